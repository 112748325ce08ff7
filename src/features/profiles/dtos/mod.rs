pub mod profile_dto;

pub use profile_dto::{
    HandleAvailabilityDto, HandleAvailabilityQuery, MeResponseDto, ProfileResponseDto,
    ProfileSearchQuery, ProfileSummaryDto, SaveTopFilmsDto, TopFilmDto, UpdateProfileDto,
};
