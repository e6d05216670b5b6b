pub mod user_dto;

pub use user_dto::{
    AccessTokenDto, LoginRequestDto, RefreshTokenQuery, RefreshTokenRequestDto, RegisterUserDto,
    TokenPairDto, UserResponseDto,
};
