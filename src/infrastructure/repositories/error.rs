use crate::domain::errors::DomainError;

const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_THING_OWNER_NAME: &str = "things_owner_id_name_key";
const CNT_THING_OWNER: &str = "things_owner_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_USERNAME => DomainError::Conflict("username already exists".into()),
                    CNT_USER_EMAIL => DomainError::Conflict("email already exists".into()),
                    CNT_THING_OWNER_NAME => {
                        DomainError::Conflict("thing name already exists".into())
                    }
                    CNT_THING_OWNER => DomainError::NotFound("owner not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
