pub mod message_dto;

pub use message_dto::{
    ChangePriorityDto, CleanupMessagesDto, CleanupResultDto, CreateMessageDto, MessageQueryParams,
    MessageTagsDto, UpdateMessageDto,
};
