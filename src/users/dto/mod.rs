pub mod register_user_dto;
