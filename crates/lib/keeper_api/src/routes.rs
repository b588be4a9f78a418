//! Route paths.

pub const GET_HEALTH: &str = "/health";

pub const POST_AUTH_LOGIN: &str = "/v1.0/auth/login";
pub const POST_AUTH_REGISTER: &str = "/v1.0/auth/register";

pub const GET_USERS_ID: &str = "/v1.0/users/{id}";

pub const POST_SECRETS: &str = "/v1.0/secrets";
pub const SECRETS_ID: &str = "/v1.0/secrets/{id}";
pub const GET_SECRETS_USER_ID: &str = "/v1.0/secrets/user/{user_id}";

/// Path parameter compared against the token subject by the owner gate.
pub const OWNER_PARAM: &str = "user_id";
