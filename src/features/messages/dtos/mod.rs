pub mod message_dto;

pub use message_dto::{MessageDto, SendMessageDto, ThreadDetailDto, ThreadDto};
