use crate::domain::commands::users::UserCommand;
use crate::domain::models::user::User as DomainUser;
use shared::{UserRequest, UserResponse};

pub struct UserMapper;

impl UserMapper {
    pub fn to_command(dto: UserRequest) -> UserCommand {
        UserCommand {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone_number: dto.phone_number,
            address: dto.address,
            date_of_birth: dto.date_of_birth,
        }
    }

    pub fn to_dto(domain: DomainUser) -> UserResponse {
        UserResponse {
            id: domain.id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            email: domain.email,
            phone_number: domain.phone_number,
            address: domain.address,
            date_of_birth: domain.date_of_birth,
        }
    }
}
