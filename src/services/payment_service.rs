// ==================== PAYMENT GATEWAY ====================
// Criação de payment intent no processador externo. Nada é persistido:
// amount entra, client_secret sai e o frontend conclui a cobrança.

use serde::{Deserialize, Serialize};

const PAYMENT_API_BASE: &str = "https://api.stripe.com/v1";
const CURRENCY: &str = "usd";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    /// Valor em dólares
    pub amount: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentIntentResponse {
    pub success: bool,
    pub client_secret: String,
}

fn api_base() -> String {
    std::env::var("PAYMENT_API_BASE").unwrap_or_else(|_| PAYMENT_API_BASE.to_string())
}

/// Dólares -> menor unidade da moeda (centavos), arredondando
pub fn amount_in_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// POST /create-payment-intent
pub async fn create_payment_intent(amount: f64) -> Result<PaymentIntentResponse, String> {
    if amount <= 0.0 {
        return Err(format!("Invalid amount: {}", amount));
    }

    let secret_key = std::env::var("PAYMENT_SECRET_KEY")
        .map_err(|_| "PAYMENT_SECRET_KEY not found in environment")?;

    let cents = amount_in_cents(amount);

    log::info!("💳 Creating payment intent: {} {} cents", cents, CURRENCY);

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/payment_intents", api_base()))
        .bearer_auth(&secret_key)
        .form(&[
            ("amount", cents.to_string()),
            ("currency", CURRENCY.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ])
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| format!("Failed to reach payment gateway: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("Payment gateway error: {}", response.status()));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse gateway response: {}", e))?;

    let client_secret = body["client_secret"]
        .as_str()
        .ok_or_else(|| "No client_secret in gateway response".to_string())?
        .to_string();

    log::info!("✅ Payment intent created");

    Ok(PaymentIntentResponse {
        success: true,
        client_secret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_in_cents() {
        assert_eq!(amount_in_cents(5.0), 500);
        assert_eq!(amount_in_cents(19.99), 1999);
        assert_eq!(amount_in_cents(0.015), 2); // arredonda, não trunca
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        assert!(create_payment_intent(0.0).await.is_err());
        assert!(create_payment_intent(-5.0).await.is_err());
    }
}
