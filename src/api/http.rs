use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::InventoryApi;
use crate::config::Config;
use crate::error::MedPulseError;
use crate::model::{AlertList, Medicine};

/// Error body the backend sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `InventoryApi` over the backend's REST interface.
pub struct HttpInventoryApi {
    client: Client,
    base_url: String,
}

impl HttpInventoryApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MedPulseError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn from_config() -> Result<Self, MedPulseError> {
        Self::new(
            &Config::get_api_base_url(),
            Duration::from_secs(Config::get_api_timeout_secs()),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> Result<Response, MedPulseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }
}

fn api_error(status: StatusCode, body: &str) -> MedPulseError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_owned()
        });

    MedPulseError::ApiError {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn list_alerts(&self, limit: usize) -> Result<AlertList, MedPulseError> {
        let url = self.url("/alerts");
        debug!("GET {} (limit {})", url, limit);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<AlertList>().await?)
    }

    async fn low_stock_medicines(&self) -> Result<Vec<Medicine>, MedPulseError> {
        let url = self.url("/medicines/low-stock");
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response).await?.json::<Vec<Medicine>>().await?)
    }

    async fn expiring_medicines(&self) -> Result<Vec<Medicine>, MedPulseError> {
        let url = self.url("/medicines/expiring");
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response).await?.json::<Vec<Medicine>>().await?)
    }

    async fn mark_alert_read(&self, alert_id: &str) -> Result<(), MedPulseError> {
        let url = self.url(&format!("/alerts/{}/read", alert_id));
        debug!("PUT {}", url);

        let response = self.client.put(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_alert(&self, alert_id: &str) -> Result<(), MedPulseError> {
        let url = self.url(&format!("/alerts/{}", alert_id));
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_medicine_quantity(
        &self,
        medicine_id: &str,
        quantity: u32,
    ) -> Result<Medicine, MedPulseError> {
        let url = self.url(&format!("/medicines/{}", medicine_id));
        debug!("PUT {} (quantity {})", url, quantity);

        let response = self
            .client
            .put(&url)
            .json(&json!({ "quantity": quantity }))
            .send()
            .await?;

        Ok(Self::check(response).await?.json::<Medicine>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlertType, Severity};
    use mockito::{Matcher, Server, ServerGuard};

    fn client_for(server: &ServerGuard) -> HttpInventoryApi {
        HttpInventoryApi::new(&format!("{}/api", server.url()), Duration::from_secs(5)).unwrap()
    }

    fn medicine_json(id: &str, quantity: u32) -> serde_json::Value {
        json!({
            "_id": id,
            "name": "Ibuprofen 200mg",
            "category": "Analgesic",
            "quantity": quantity,
            "minQuantity": 20
        })
    }

    #[tokio::test]
    async fn test_list_alerts_sends_limit() {
        let mut server = Server::new_async().await;
        let body = json!({
            "alerts": [{
                "_id": "A1",
                "type": "medicine_issued",
                "severity": "info",
                "title": "Issued",
                "message": "10 units issued",
                "createdAt": "2024-06-04T13:45:00.000Z",
                "isRead": false,
                "isActive": true
            }],
            "total": 7
        });
        let mock = server
            .mock("GET", "/api/alerts")
            .match_query(Matcher::UrlEncoded("limit".into(), "50".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let list = client_for(&server).list_alerts(50).await.unwrap();

        mock.assert_async().await;
        assert_eq!(list.total, 7);
        assert_eq!(list.alerts.len(), 1);
        assert_eq!(list.alerts[0].alert_type, AlertType::MedicineIssued);
        assert_eq!(list.alerts[0].severity, Severity::Info);
    }

    #[tokio::test]
    async fn test_low_stock_medicines() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/medicines/low-stock")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([medicine_json("m1", 3)]).to_string())
            .create_async()
            .await;

        let medicines = client_for(&server).low_stock_medicines().await.unwrap();

        mock.assert_async().await;
        assert_eq!(medicines.len(), 1);
        assert_eq!(medicines[0].quantity, 3);
        assert_eq!(medicines[0].min_quantity, 20);
    }

    #[tokio::test]
    async fn test_expiring_medicines() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/medicines/expiring")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([medicine_json("e1", 40), medicine_json("e2", 12)]).to_string())
            .create_async()
            .await;

        let medicines = client_for(&server).expiring_medicines().await.unwrap();

        mock.assert_async().await;
        let ids: Vec<&str> = medicines.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[tokio::test]
    async fn test_mark_alert_read() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/alerts/A1/read")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Alert marked as read"}"#)
            .create_async()
            .await;

        client_for(&server).mark_alert_read("A1").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_alert() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/alerts/A1")
            .with_status(204)
            .create_async()
            .await;

        client_for(&server).delete_alert("A1").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_medicine_quantity_sends_new_total() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/medicines/m1")
            .match_body(Matcher::Json(json!({ "quantity": 43 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(medicine_json("m1", 43).to_string())
            .create_async()
            .await;

        let updated = client_for(&server)
            .update_medicine_quantity("m1", 43)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(updated.quantity, 43);
    }

    #[tokio::test]
    async fn test_client_error_carries_backend_message() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/alerts/missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Alert not found"}"#)
            .create_async()
            .await;

        let err = client_for(&server).delete_alert("missing").await.unwrap_err();

        mock.assert_async().await;
        match err {
            MedPulseError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Alert not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_on_read_is_an_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/medicines/expiring")
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let err = client_for(&server).expiring_medicines().await.unwrap_err();
        assert_eq!(err.to_string(), "API error (503): Service Unavailable");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpInventoryApi::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.url("/alerts"), "http://localhost:5000/api/alerts");
    }

    #[test]
    fn test_api_error_uses_backend_message() {
        let err = api_error(StatusCode::NOT_FOUND, r#"{"message":"Alert not found"}"#);
        match err {
            MedPulseError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Alert not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_status_reason() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.to_string(), "API error (500): Internal Server Error");
    }
}
