//! Debt model and its payment/penalty sub-operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::blocking;
use crate::client::LendClient;
use crate::environment::Service;
use crate::error::{LendError, Result};
use crate::traits::{Query, Resource, Retrieve};

/// An amount in a specific currency. Amounts travel as strings to keep
/// decimal precision intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    pub currency: String,
}

/// Outstanding balance broken down by component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub fees: Money,
    pub interest: Money,
    pub principal: Money,
    pub taxes: Money,
    pub penalties: Money,
    pub total: Money,
}

/// A debt managed by the credit-management service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    #[serde(rename = "debtId")]
    pub id: String,

    /// Payment-flow id; payments and penalties are addressed by it.
    pub flow_id: String,

    pub tenant: String,

    pub reference_id: String,

    pub status: String,

    pub sub_status: String,

    pub balance: Balance,

    pub closing_balance: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub version: i64,
}

/// A payment registered against a debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub debt_id: String,
    pub amount: Money,
    pub payment_date: String,
    pub reference_id: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A penalty applied to a debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalty {
    pub amount: Money,
    pub date: String,
    pub reference_id: String,
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub penalty_type: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payment submission parameters.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub amount: Money,
    pub reference_id: String,
    pub notes: Option<String>,
    /// Defaults to today when unset.
    pub payment_date: Option<NaiveDate>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentBody<'a> {
    amount: &'a Money,
    reference_id: &'a str,
    notes: &'a str,
    payment_date: String,
}

impl<'a> PaymentBody<'a> {
    fn from_input(input: &'a PaymentInput) -> Self {
        let date = input
            .payment_date
            .unwrap_or_else(|| Utc::now().date_naive());
        Self {
            amount: &input.amount,
            reference_id: &input.reference_id,
            notes: input.notes.as_deref().unwrap_or(""),
            payment_date: date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Filter parameters for querying debts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DebtFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "client-id", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Debt {
    fn payments_path(&self) -> String {
        format!("v1/dpas/{}/payments", self.flow_id)
    }

    fn penalties_path(&self) -> String {
        format!("v1/dpas/{}/penalties", self.flow_id)
    }

    /// Payments registered against this debt.
    pub async fn payments(&self, client: &LendClient) -> Result<Vec<Payment>> {
        let path = self.payments_path();
        client
            .with_renewal(|| async {
                let response = client.get(Self::SERVICE, &path).await?;
                response.json::<Vec<Payment>>().await.map_err(LendError::Http)
            })
            .await
    }

    /// Register a payment against this debt.
    ///
    /// Submission is not idempotent on the service side; use a unique
    /// `reference_id` per payment.
    pub async fn submit_payment(&self, client: &LendClient, payment: &PaymentInput) -> Result<()> {
        let path = self.payments_path();
        let body = PaymentBody::from_input(payment);
        client
            .with_renewal(|| async {
                client.post(Self::SERVICE, &path, &body).await.map(|_| ())
            })
            .await
    }

    /// Penalties applied to this debt.
    pub async fn penalties(&self, client: &LendClient) -> Result<Vec<Penalty>> {
        let path = self.penalties_path();
        client
            .with_renewal(|| async {
                let response = client.get(Self::SERVICE, &path).await?;
                response.json::<Vec<Penalty>>().await.map_err(LendError::Http)
            })
            .await
    }

    /// Blocking mirror of [`payments`](Self::payments).
    pub fn payments_blocking(&self, client: &blocking::LendClient) -> Result<Vec<Payment>> {
        let path = self.payments_path();
        client.with_renewal(|| {
            let response = client.get(Self::SERVICE, &path)?;
            response.json::<Vec<Payment>>().map_err(LendError::Http)
        })
    }

    /// Blocking mirror of [`submit_payment`](Self::submit_payment).
    pub fn submit_payment_blocking(
        &self,
        client: &blocking::LendClient,
        payment: &PaymentInput,
    ) -> Result<()> {
        let path = self.payments_path();
        let body = PaymentBody::from_input(payment);
        client.with_renewal(|| client.post(Self::SERVICE, &path, &body).map(|_| ()))
    }

    /// Blocking mirror of [`penalties`](Self::penalties).
    pub fn penalties_blocking(&self, client: &blocking::LendClient) -> Result<Vec<Penalty>> {
        let path = self.penalties_path();
        client.with_renewal(|| {
            let response = client.get(Self::SERVICE, &path)?;
            response.json::<Vec<Penalty>>().map_err(LendError::Http)
        })
    }
}

impl Resource for Debt {
    const SERVICE: Service = Service::CreditManagement;
    const PATH: &'static str = "v1/debts";
    const ID_FIELD: &'static str = "debtId";
}

impl Retrieve for Debt {}

impl Query for Debt {
    type Filter = DebtFilter;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_body_defaults_notes_and_date() {
        let input = PaymentInput {
            amount: Money {
                amount: "125.00".to_string(),
                currency: "USD".to_string(),
            },
            reference_id: "pay-1".to_string(),
            notes: None,
            payment_date: NaiveDate::from_ymd_opt(2024, 5, 17),
        };
        let value = serde_json::to_value(PaymentBody::from_input(&input)).unwrap();

        assert_eq!(value["amount"]["amount"], "125.00");
        assert_eq!(value["notes"], "");
        assert_eq!(value["paymentDate"], "2024-05-17");
        assert_eq!(value["referenceId"], "pay-1");
    }

    #[test]
    fn sub_resource_paths_use_the_flow_id() {
        let debt: Debt = serde_json::from_value(serde_json::json!({
            "debtId": "d-1",
            "flowId": "flow-7",
            "tenant": "acme",
            "referenceId": "ref-1",
            "status": "active",
            "subStatus": "current",
            "balance": {
                "fees": {"amount": "0", "currency": "USD"},
                "interest": {"amount": "10.00", "currency": "USD"},
                "principal": {"amount": "90.00", "currency": "USD"},
                "taxes": {"amount": "0", "currency": "USD"},
                "penalties": {"amount": "0", "currency": "USD"},
                "total": {"amount": "100.00", "currency": "USD"}
            },
            "closingBalance": {"amount": "100.00", "currency": "USD"},
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-02T12:00:00Z",
            "version": 3
        }))
        .unwrap();

        assert_eq!(debt.payments_path(), "v1/dpas/flow-7/payments");
        assert_eq!(debt.penalties_path(), "v1/dpas/flow-7/penalties");
    }
}
