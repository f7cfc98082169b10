use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::account::{AccountDetails, ClientCard, User};
use crate::errors::AppError;
use crate::ShopCartService;

use super::auth::CurrentUser;
use super::dto::{money, CartView};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            login: u.login,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientCardResponse {
    pub id: Uuid,
    /// `BONUS`, `SOCIAL` or `GOLD`.
    #[serde(rename = "type")]
    pub card_type: String,
    pub bonus_amount: String,
    /// Fraction of the subtotal taken off, e.g. "0.05".
    pub percentage: Option<String>,
}

impl From<ClientCard> for ClientCardResponse {
    fn from(c: ClientCard) -> Self {
        ClientCardResponse {
            id: c.id,
            card_type: c.card_type.as_str().to_string(),
            bonus_amount: money(&c.bonus_amount),
            percentage: c.percentage.map(|p| p.to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetailsResponse {
    pub user: UserResponse,
    pub card: Option<ClientCardResponse>,
    pub cart: CartView,
}

impl From<AccountDetails> for AccountDetailsResponse {
    fn from(d: AccountDetails) -> Self {
        AccountDetailsResponse {
            user: d.user.into(),
            card: d.card.map(ClientCardResponse::from),
            cart: d.cart.into(),
        }
    }
}

/// GET /api/account-details
///
/// The current user, their loyalty card and their priced cart.
#[utoipa::path(
    get,
    path = "/api/account-details",
    params(
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "Account details", body = AccountDetailsResponse),
        (status = 401, description = "Missing or unknown user"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "account"
)]
pub async fn get_account_details(
    carts: web::Data<ShopCartService>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let details = web::block(move || carts.account_details(user.0))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(AccountDetailsResponse::from(details)))
}
