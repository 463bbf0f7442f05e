//! Caller identity middleware.
//!
//! The authentication gateway in front of this service sets `x-user-uuid`
//! for signed-in users. Guest ids travel in request bodies and queries.

use salvo::prelude::*;
use storefront_app::identity::UserUuid;

use crate::extensions::*;

pub(crate) const USER_UUID_HEADER: &str = "x-user-uuid";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(value) = req.header::<String>(USER_UUID_HEADER) {
        match value.trim().parse::<UserUuid>().or_400("Invalid x-user-uuid header") {
            Ok(user) => depot.insert_user_uuid(user),
            Err(status) => {
                res.render(status);
                ctrl.skip_rest();

                return;
            }
        }
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot
            .user_uuid()
            .map_or_else(|| "anonymous".to_string(), |user| user.to_string());

        res.render(user);
    }

    fn make_service() -> Service {
        Service::new(Router::new().hoop(handler).get(echo_user))
    }

    #[tokio::test]
    async fn test_missing_header_leaves_request_anonymous() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_header_injects_user_uuid() -> TestResult {
        let user = Uuid::now_v7();

        let mut res = TestClient::get("http://example.com")
            .add_header(USER_UUID_HEADER, user.to_string(), true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, user.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_header_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(USER_UUID_HEADER, "not-a-uuid", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
