pub mod create_employee_dto;
pub mod update_role_dto;
