//! AWS Lambda handler for computing a proposal
//!
//! Accepts an API Gateway proxy request whose JSON body names the segment and
//! the field edits to apply, and returns the proposal with its figures.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use solar_proposal::{
    InputField, ProjectionEngine, ProjectionResult, Proposal, ProposalError, ProposalType, Result,
};

/// Request body
#[derive(Debug, Deserialize)]
pub struct ProposalRequest {
    #[serde(default)]
    pub proposal_type: ProposalType,

    #[serde(default)]
    pub client_name: Option<String>,

    /// Field name to raw value; numbers, strings, booleans and nulls accepted
    #[serde(default)]
    pub edits: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub proposal: Proposal,
    pub result: ProjectionResult,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Coupled fields go last so an explicit bill wins over consumption x tariff
fn edit_rank(field: InputField) -> u8 {
    match field {
        InputField::ProposalType => 0,
        InputField::MonthlyConsumption => 2,
        InputField::Tariff => 3,
        InputField::CurrentBill => 4,
        _ => 1,
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn build_proposal(request: ProposalRequest) -> Result<Proposal> {
    let mut edits = request
        .edits
        .iter()
        .map(|(key, value)| Ok((key.parse::<InputField>()?, raw_text(value))))
        .collect::<Result<Vec<_>>>()?;
    edits.sort_by_key(|(field, _)| edit_rank(*field));

    // Segment edits reset the record, so they run before the client name is set
    let split = edits.partition_point(|(field, _)| *field == InputField::ProposalType);
    let (segment_edits, field_edits) = edits.split_at(split);

    let mut proposal = Proposal::for_segment(request.proposal_type);
    for (field, raw) in segment_edits {
        proposal.apply_edit(*field, raw)?;
    }
    if let Some(name) = request.client_name {
        proposal.client_name = name;
    }
    for (field, raw) in field_edits {
        proposal.apply_edit(*field, raw)?;
    }
    Ok(proposal)
}

fn compute(body: &str) -> Result<ProposalResponse> {
    let request: ProposalRequest = serde_json::from_str(body)?;
    let proposal = build_proposal(request)?;
    let result = ProjectionEngine::default().compute(&proposal.inputs);
    Ok(ProposalResponse { proposal, result })
}

fn json_response<T: Serialize>(status_code: i64, body: &T) -> ApiGatewayProxyResponse {
    let text = serde_json::to_string(body).unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#));
    ApiGatewayProxyResponse {
        status_code,
        body: Some(Body::Text(text)),
        ..Default::default()
    }
}

fn respond(body: &str) -> ApiGatewayProxyResponse {
    match compute(body) {
        Ok(response) => json_response(200, &response),
        Err(e) => {
            warn!("Rejected request: {e}");
            let status = match e {
                ProposalError::Io(_) => 500,
                _ => 400,
            };
            json_response(status, &ErrorBody { error: e.to_string() })
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> std::result::Result<ApiGatewayProxyResponse, Error> {
    let body = event.payload.body.as_deref().unwrap_or("{}");
    info!("Proposal request {}", event.context.request_id);
    Ok(respond(body))
}

#[tokio::main]
async fn main() -> std::result::Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(response: &ApiGatewayProxyResponse) -> Value {
        match &response.body {
            Some(Body::Text(text)) => serde_json::from_str(text).unwrap(),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_defaults_for_segment() {
        let response = respond(r#"{"proposal_type":"Business","client_name":"Padaria Central"}"#);
        assert_eq!(response.status_code, 200);

        let json = body_json(&response);
        assert_eq!(json["proposal"]["client_name"], "Padaria Central");
        assert_eq!(json["result"]["monthly_savings"], 3110.0);
        assert_eq!(json["result"]["payback_years"], 3);
    }

    #[test]
    fn test_bill_edit_wins_over_consumption() {
        let response = respond(
            r#"{"proposal_type":"Residential","edits":{"current_monthly_bill":"2000","monthly_consumption_kwh":1000}}"#,
        );
        assert_eq!(response.status_code, 200);

        let json = body_json(&response);
        assert_eq!(json["proposal"]["current_monthly_bill"], 2000.0);
        assert_eq!(json["result"]["monthly_savings"], 1880.0);
    }

    #[test]
    fn test_camel_case_and_blank_edits() {
        let response = respond(r#"{"proposal_type":"Rural","edits":{"minimumMonthlyFee":"","investmentAmount":50000}}"#);
        let json = body_json(&response);
        assert_eq!(json["proposal"]["minimum_monthly_fee"], 0.0);
        assert_eq!(json["proposal"]["investment_amount"], 50000.0);
    }

    #[test]
    fn test_bad_requests_are_400() {
        for body in [
            "not json",
            r#"{"proposal_type":"Commercial"}"#,
            r#"{"edits":{"roof_area":10}}"#,
            r#"{"edits":{"tariff_per_kwh":"abc"}}"#,
        ] {
            let response = respond(body);
            assert_eq!(response.status_code, 400, "{body}");
            assert!(body_json(&response)["error"].is_string());
        }
    }

    #[test]
    fn test_segment_edit_keeps_client_name() {
        let response = respond(
            r#"{"proposal_type":"Business","client_name":"Padaria Central","edits":{"proposal_type":"Rural","investment_amount":90000}}"#,
        );
        assert_eq!(response.status_code, 200);

        let json = body_json(&response);
        assert_eq!(json["proposal"]["proposal_type"], "Rural");
        assert_eq!(json["proposal"]["client_name"], "Padaria Central");
        assert_eq!(json["proposal"]["investment_amount"], 90000.0);
    }

    #[test]
    fn test_segment_spelling_is_lenient() {
        let response = respond(r#"{"proposal_type":"business_renter"}"#);
        assert_eq!(response.status_code, 200);
        assert_eq!(body_json(&response)["proposal"]["proposal_type"], "BusinessRenter");
    }

    #[test]
    fn test_empty_body_uses_business_defaults() {
        let json = body_json(&respond("{}"));
        assert_eq!(json["proposal"]["proposal_type"], "Business");
    }
}
