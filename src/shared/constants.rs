/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// CONTENT LIMITS
// =============================================================================

/// Maximum length of a direct message body, in characters.
///
/// Counted as Unicode scalar values on the raw body, the same unit as the
/// `char_length(body)` check on the `messages` table. A JS client counting
/// UTF-16 units sees astral characters (most emoji) as two.
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// Maximum length of a post body, in characters
pub const MAX_POST_LENGTH: usize = 1000;

/// Number of posts returned by the profile timeline and the followers feed
pub const FEED_LIMIT: i64 = 25;

/// Number of newest project postings and marketplace listings returned
pub const LISTING_LIMIT: i64 = 20;

/// Only the first N top films of a profile are kept
pub const MAX_TOP_FILMS: usize = 8;

pub const MAX_FILM_TITLE_LENGTH: usize = 100;

pub const MIN_FILM_YEAR: i32 = 1900;

pub const MAX_FILM_YEAR: i32 = 2030;

// =============================================================================
// DISPLAY FALLBACKS
// =============================================================================

/// Display name used when a profile cannot be resolved
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

/// Handle used when a profile cannot be resolved
pub const UNKNOWN_USER_HANDLE: &str = "unknown";

// =============================================================================
// VIEW PATHS
// =============================================================================

/// View invalidated after a direct message is sent
pub const MESSAGES_VIEW: &str = "/messages";

/// Home view (followers feed) invalidated after a post is created
pub const HOME_VIEW: &str = "/";

/// Project board invalidated after a project is posted
pub const PROJECTS_VIEW: &str = "/projects";

/// Marketplace invalidated after a listing is created
pub const MARKETPLACE_VIEW: &str = "/marketplace";
