use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use md5::{Digest, Md5};
use sea_orm::ColumnTrait;
use sea_orm::EntityTrait;
use sea_orm::QueryFilter;
use serde::Deserialize;

use entities::prelude::User;
use entities::user;

use crate::error::ApiError;
use crate::AppState;

/// `u` is the username, `t` is md5(password + `s`), `s` is a client salt.
#[derive(Deserialize, Clone, Default)]
pub struct Auth {
    #[serde(default)]
    u: String,
    #[serde(default)]
    t: String,
    #[serde(default)]
    s: String,
}

/// Id of the caller, attached to the request once the token checks out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
}

pub fn token_for(password: &str, salt: &str) -> String {
    // create a Md5 hasher instance
    let mut hasher = Md5::new();
    hasher.update(password.to_owned() + salt);
    format!("{:x}", hasher.finalize())
}

fn unauthorized() -> Response {
    ApiError::Authentication("Missing authentication".to_string()).into_response()
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    auth: Option<Query<Auth>>,
    mut request: Request,
    next: Next,
) -> Response {
    let owned_auth = auth.map(|Query(auth)| auth).unwrap_or_default();
    if owned_auth.u.is_empty() || owned_auth.t.is_empty() {
        return unauthorized();
    }

    let user_result = User::find()
        .filter(user::Column::Username.eq(&owned_auth.u))
        .one(state.store.connection())
        .await;
    let user = match user_result {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("User doesn't exist: {}", &owned_auth.u);
            return unauthorized();
        }
        Err(err) => {
            error!("Error in database connection: {}", err);
            return ApiError::from(err).into_response();
        }
    };

    if !owned_auth.t.eq(&token_for(&user.password, &owned_auth.s)) {
        warn!("Wrong password for user {}", &owned_auth.u);
        return unauthorized();
    }

    request
        .extensions_mut()
        .insert(AuthenticatedUser { id: user.id });

    // Carry on my wayward son
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_md5_of_password_and_salt() {
        // md5("secret" + "abc")
        assert_eq!(token_for("secret", "abc"), "c42b93a1ac3b382e88071510296a96ce");
        assert_ne!(token_for("secret", "abd"), token_for("secret", "abc"));
    }
}
