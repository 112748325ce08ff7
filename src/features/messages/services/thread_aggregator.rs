use std::collections::hash_map::Entry;
use std::collections::HashMap;

use uuid::Uuid;

use crate::features::messages::dtos::ThreadDto;
use crate::features::messages::models::Message;
use crate::features::profiles::models::ProfileSummary;
use crate::shared::constants::{UNKNOWN_USER_HANDLE, UNKNOWN_USER_NAME};

/// Groups `current_user`'s messages into one thread per counterpart.
///
/// `messages` may arrive in any order. A thread keeps the body and time of
/// its most recent message; when two messages share a timestamp the one
/// seen later wins. `unread_count` counts every message the counterpart
/// sent to `current_user`. Messages that do not involve `current_user` are
/// skipped. Counterparts missing from `profiles` get placeholder display
/// data.
///
/// The result is ordered by `last_message_time`, most recent first.
pub fn aggregate_threads(
    current_user: Uuid,
    messages: &[Message],
    profiles: &HashMap<Uuid, ProfileSummary>,
) -> Vec<ThreadDto> {
    let mut threads: HashMap<Uuid, ThreadDto> = HashMap::new();

    for message in messages {
        let Some(counterpart_id) = message.counterpart_of(current_user) else {
            continue;
        };
        let incoming = message.is_incoming_for(current_user);

        match threads.entry(counterpart_id) {
            Entry::Vacant(slot) => {
                let (counterpart_name, counterpart_handle) = match profiles.get(&counterpart_id) {
                    Some(profile) => (profile.display_name(), profile.display_handle()),
                    None => (
                        UNKNOWN_USER_NAME.to_string(),
                        UNKNOWN_USER_HANDLE.to_string(),
                    ),
                };

                slot.insert(ThreadDto {
                    counterpart_id,
                    counterpart_name,
                    counterpart_handle,
                    last_message_body: message.body.clone(),
                    last_message_time: message.created_at,
                    unread_count: i64::from(incoming),
                });
            }
            Entry::Occupied(mut slot) => {
                let thread = slot.get_mut();
                if message.created_at >= thread.last_message_time {
                    thread.last_message_body = message.body.clone();
                    thread.last_message_time = message.created_at;
                }
                if incoming {
                    thread.unread_count += 1;
                }
            }
        }
    }

    let mut threads: Vec<ThreadDto> = threads.into_values().collect();
    threads.sort_by(|a, b| {
        b.last_message_time
            .cmp(&a.last_message_time)
            .then_with(|| a.counterpart_id.cmp(&b.counterpart_id))
    });
    threads
}
