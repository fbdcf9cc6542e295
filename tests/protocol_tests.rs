//! End-to-end tests for the protocol: wire fidelity, deterministic ordering,
//! and the full requester -> analyzers -> collector flow.

use async_trait::async_trait;
use serde_json::json;

use codereview_protocol::application::{AnalyzerTransport, CollectPredictions, TransportError};
use codereview_protocol::domain::{
    sort_vulnerabilities, AnalysisExchange, Category, CodeRequest, LineRange, MinerId,
    PredictionResponse, Severity, ValidationError, Vulnerability, VulnerabilityByMiner,
};

mod fixtures {
    use super::*;

    pub const SAMPLE_CODE: &str = r#"
fn withdraw(&mut self, amount: u64) {
    self.balance -= amount;
    send(self.caller, amount);
}
"#;

    pub fn vulnerability(
        title: &str,
        severity: Severity,
        start: Option<u32>,
        category: Category,
    ) -> Vulnerability {
        Vulnerability::new(
            title.to_string(),
            severity,
            start.map(|s| vec![LineRange::new(s, s + 3).unwrap()]),
            category,
            format!("{} allows draining the balance", title),
            "self.balance -= amount;".to_string(),
            "withdraw(u64::MAX)".to_string(),
            "self.balance = self.balance.checked_sub(amount).expect(\"insufficient\");"
                .to_string(),
        )
        .unwrap()
    }

    pub fn response(vulnerabilities: Vec<Vulnerability>) -> PredictionResponse {
        let prediction = !vulnerabilities.is_empty();
        PredictionResponse::new(prediction, vulnerabilities)
    }
}

struct ScriptedAnalyzer {
    response: Result<PredictionResponse, &'static str>,
}

#[async_trait]
impl AnalyzerTransport for ScriptedAnalyzer {
    async fn analyze(&self, _request: CodeRequest) -> Result<PredictionResponse, TransportError> {
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(reason) => Err(TransportError::Unreachable {
                reason: reason.to_string(),
            }),
        }
    }
}

#[test]
fn serialization_fidelity_for_every_entity() {
    let vulnerability = fixtures::vulnerability(
        "Unchecked subtraction",
        Severity::Critical,
        Some(3),
        Category::LogicError,
    );
    let tagged = VulnerabilityByMiner::from_pair("miner-9", vulnerability.clone()).unwrap();
    let response = fixtures::response(vec![vulnerability.clone()]);
    let request = CodeRequest::new(fixtures::SAMPLE_CODE, vec![Category::LogicError]);
    let mut exchange = AnalysisExchange::new(request.clone());
    exchange.set_response(response.clone());

    let back: Vulnerability =
        Vulnerability::from_json(&serde_json::to_string(&vulnerability).unwrap()).unwrap();
    assert_eq!(back, vulnerability);

    let back = VulnerabilityByMiner::from_json(&serde_json::to_string(&tagged).unwrap()).unwrap();
    assert_eq!(back, tagged);

    let back = PredictionResponse::from_json(&serde_json::to_string(&response).unwrap()).unwrap();
    assert_eq!(back, response);

    let back = CodeRequest::from_json(&serde_json::to_string(&request).unwrap()).unwrap();
    assert_eq!(back, request);

    let back = AnalysisExchange::from_json(&serde_json::to_string(&exchange).unwrap()).unwrap();
    assert_eq!(back, exchange);
}

#[test]
fn wire_shapes_match_the_contract() {
    let vulnerability = fixtures::vulnerability(
        "Reflected input",
        Severity::High,
        Some(5),
        Category::Injection,
    );
    let value = serde_json::to_value(&vulnerability).unwrap();

    assert_eq!(value["severity"], "high");
    assert_eq!(value["category"], "injection");
    assert_eq!(value["line_ranges"], json!([{ "start": 5, "end": 8 }]));
    for field in [
        "title",
        "description",
        "vulnerable_code",
        "code_to_exploit",
        "rewritten_code_to_fix_vulnerability",
    ] {
        assert!(value.get(field).is_some(), "missing field {field}");
    }

    // Absent location serializes as null, not as a missing key.
    let unlocated =
        fixtures::vulnerability("No location", Severity::Low, None, Category::DataExposure);
    let value = serde_json::to_value(&unlocated).unwrap();
    assert_eq!(value["line_ranges"], serde_json::Value::Null);
}

#[test]
fn parsed_structure_and_json_string_validate_identically() {
    let raw = json!({
        "title": "",
        "severity": "high",
        "category": "injection",
        "description": "d",
        "vulnerable_code": "",
        "code_to_exploit": "",
        "rewritten_code_to_fix_vulnerability": ""
    });

    let from_value = Vulnerability::from_value(raw.clone());
    let from_json = Vulnerability::from_json(&raw.to_string());
    assert!(matches!(
        from_value,
        Err(ValidationError::EmptyField { field: "title" })
    ));
    assert!(matches!(
        from_json,
        Err(ValidationError::EmptyField { field: "title" })
    ));
}

#[test]
fn round_trip_laws() {
    let vulnerability = fixtures::vulnerability(
        "Leaked key material",
        Severity::Medium,
        None,
        Category::Cryptography,
    );

    let tagged = VulnerabilityByMiner::from_pair("hotkey-17", vulnerability.clone()).unwrap();
    let (miner_id, inner) = tagged.clone().to_pair();
    assert_eq!(
        VulnerabilityByMiner::from_pair(miner_id, inner).unwrap(),
        tagged
    );

    let response = fixtures::response(vec![vulnerability]);
    assert_eq!(
        PredictionResponse::from_pair(response.clone().to_pair()),
        response
    );
}

#[test]
fn canonical_order_for_display() {
    let a = fixtures::vulnerability("A", Severity::High, Some(5), Category::Injection);
    let b = fixtures::vulnerability("B", Severity::Critical, Some(100), Category::Injection);
    let c = fixtures::vulnerability("C", Severity::High, None, Category::Injection);

    // Severity dominates line start; missing location goes last within a tier.
    let sorted = sort_vulnerabilities(&[a.clone(), c.clone(), b.clone()]);
    assert_eq!(sorted, vec![b, a, c]);
}

#[tokio::test]
async fn full_round_trip_through_collector() {
    let strict = ScriptedAnalyzer {
        response: Ok(fixtures::response(vec![
            fixtures::vulnerability(
                "Reentrancy in withdraw",
                Severity::Critical,
                Some(2),
                Category::LogicError,
            ),
            fixtures::vulnerability(
                "Unchecked subtraction",
                Severity::High,
                Some(3),
                Category::LogicError,
            ),
        ])),
    };
    let quiet = ScriptedAnalyzer {
        response: Ok(fixtures::response(vec![])),
    };
    let offline = ScriptedAnalyzer {
        response: Err("no route to analyzer"),
    };

    let analyzers: Vec<(MinerId, &dyn AnalyzerTransport)> = vec![
        (MinerId::new("offline").unwrap(), &offline),
        (MinerId::new("quiet").unwrap(), &quiet),
        (MinerId::new("strict").unwrap(), &strict),
    ];

    let request = CodeRequest::for_all_categories(fixtures::SAMPLE_CODE);
    let report = CollectPredictions::new()
        .execute(&request, &analyzers)
        .await
        .unwrap();

    // Two analyzers answered, one of them with nothing to report.
    assert_eq!(report.analyzer_count, 2);
    assert_eq!(report.findings.len(), 2);
    assert_eq!(
        report.findings[0].vulnerability.title,
        "Reentrancy in withdraw"
    );
    assert!(report
        .findings
        .iter()
        .all(|f| f.miner_id.as_str() == "strict"));
}

#[test]
fn empty_acceptable_categories_means_no_restriction() {
    let request = CodeRequest::from_json(r#"{"code": "fn main() {}"}"#).unwrap();
    assert!(request.acceptable_vulnerability_categories.is_empty());

    let explicit =
        CodeRequest::from_json(r#"{"code": "x", "acceptable_vulnerability_categories": []}"#)
            .unwrap();
    assert!(explicit.acceptable_vulnerability_categories.is_empty());
}

#[test]
fn exchange_starts_with_default_response() {
    let exchange = AnalysisExchange::new(CodeRequest::for_all_categories("code"));
    assert_eq!(exchange.response(), &PredictionResponse::default());

    // The wire shape keeps the original flat envelope layout.
    let value = serde_json::to_value(&exchange).unwrap();
    assert_eq!(value["response"]["prediction"], false);
    assert_eq!(
        value["acceptable_vulnerability_categories"]
            .as_array()
            .unwrap()
            .len(),
        Category::all().len()
    );
}
