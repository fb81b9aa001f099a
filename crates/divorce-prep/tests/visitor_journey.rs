//! End-to-end scenarios for a visitor: run the self-service tools, then ask for
//! a consultation that references the diagnosis session.

mod common {
    use std::sync::{Arc, Mutex};

    use axum::response::Response;
    use axum::Router;
    use serde_json::Value;

    use divorce_prep::consultation::{
        consultation_router, ConsultationRepository, ConsultationService, ConsultationTicket,
        TicketId,
    };
    use divorce_prep::session::SessionId;
    use divorce_prep::store::RepositoryError;
    use divorce_prep::tools::calculator::{
        calculator_router, CalculationRecord, CalculationRepository, ChildSupportService,
    };
    use divorce_prep::tools::diagnosis::{
        diagnosis_router, DiagnosisRecord, DiagnosisRepository, DiagnosisService,
    };

    #[derive(Default, Clone)]
    pub struct Store {
        pub calculations: Arc<Mutex<Vec<CalculationRecord>>>,
        pub diagnoses: Arc<Mutex<Vec<DiagnosisRecord>>>,
        pub tickets: Arc<Mutex<Vec<ConsultationTicket>>>,
    }

    impl CalculationRepository for Store {
        fn insert(&self, record: CalculationRecord) -> Result<CalculationRecord, RepositoryError> {
            self.calculations.lock().expect("mutex").push(record.clone());
            Ok(record)
        }

        fn by_session(
            &self,
            session_id: &SessionId,
        ) -> Result<Vec<CalculationRecord>, RepositoryError> {
            let guard = self.calculations.lock().expect("mutex");
            Ok(guard
                .iter()
                .filter(|record| &record.session_id == session_id)
                .cloned()
                .collect())
        }
    }

    impl DiagnosisRepository for Store {
        fn insert(&self, record: DiagnosisRecord) -> Result<DiagnosisRecord, RepositoryError> {
            self.diagnoses.lock().expect("mutex").push(record.clone());
            Ok(record)
        }

        fn by_session(
            &self,
            session_id: &SessionId,
        ) -> Result<Vec<DiagnosisRecord>, RepositoryError> {
            let guard = self.diagnoses.lock().expect("mutex");
            Ok(guard
                .iter()
                .filter(|record| &record.session_id == session_id)
                .cloned()
                .collect())
        }
    }

    impl ConsultationRepository for Store {
        fn insert(
            &self,
            ticket: ConsultationTicket,
        ) -> Result<ConsultationTicket, RepositoryError> {
            self.tickets.lock().expect("mutex").push(ticket.clone());
            Ok(ticket)
        }

        fn update(&self, ticket: ConsultationTicket) -> Result<(), RepositoryError> {
            let mut guard = self.tickets.lock().expect("mutex");
            let slot = guard
                .iter_mut()
                .find(|existing| existing.id == ticket.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = ticket;
            Ok(())
        }

        fn fetch(&self, id: &TicketId) -> Result<Option<ConsultationTicket>, RepositoryError> {
            let guard = self.tickets.lock().expect("mutex");
            Ok(guard.iter().find(|ticket| &ticket.id == id).cloned())
        }

        fn list(&self) -> Result<Vec<ConsultationTicket>, RepositoryError> {
            Ok(self.tickets.lock().expect("mutex").clone())
        }
    }

    pub fn app(store: &Store) -> Router {
        let shared = Arc::new(store.clone());
        calculator_router(Arc::new(ChildSupportService::new(shared.clone())))
            .merge(diagnosis_router(Arc::new(DiagnosisService::new(
                shared.clone(),
            ))))
            .merge(consultation_router(Arc::new(ConsultationService::new(
                shared,
            ))))
    }

    pub async fn json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{app, json_body, Store};

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn all_answers(option: char) -> Value {
    let answers: Vec<Value> = (1..=10)
        .map(|n| {
            let score = match option {
                'a' => 3,
                'b' => 2,
                _ => 1,
            };
            json!({
                "questionId": format!("q{n}"),
                "optionId": format!("q{n}_{option}"),
                "score": score
            })
        })
        .collect();
    Value::Array(answers)
}

#[tokio::test]
async fn calculator_example_matches_the_standard_table() {
    let store = Store::default();

    let response = app(&store)
        .oneshot(post(
            "/api/calculator",
            json!({
                "parent1Income": 4_000_000,
                "parent2Income": 3_000_000,
                "childrenCount": 1,
                "childrenAgeGroup": "6-11",
                "custodialParent": 1
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = json_body(response).await;
    let data = &payload["data"];
    assert_eq!(data["combinedIncome"], json!(7_000_000));
    assert_eq!(data["baseAmount"], json!(847_000));
    assert_eq!(data["parent1Ratio"], json!(57.14));
    assert_eq!(data["parent2Ratio"], json!(42.86));
    assert_eq!(data["nonCustodialPayment"], json!(363_024));
    assert_eq!(store.calculations.lock().expect("mutex").len(), 1);
}

#[tokio::test]
async fn diagnosis_bands_follow_the_total_score() {
    let cases = [('a', "협의", 30), ('b', "조정", 20), ('c', "소송", 10)];

    for (option, expected, score) in cases {
        let store = Store::default();
        let response = app(&store)
            .oneshot(post("/api/diagnosis", json!({ "answers": all_answers(option) })))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["data"]["resultType"], json!(expected));
        assert_eq!(payload["data"]["score"], json!(score));
        assert_eq!(payload["data"]["answeredQuestions"], json!(10));
    }
}

#[tokio::test]
async fn diagnosis_needs_five_answers() {
    let store = Store::default();
    let four: Vec<Value> = all_answers('a')
        .as_array()
        .expect("array")
        .iter()
        .take(4)
        .cloned()
        .collect();

    let response = app(&store)
        .oneshot(post("/api/diagnosis", json!({ "answers": four })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.diagnoses.lock().expect("mutex").is_empty());
}

#[tokio::test]
async fn consultation_can_reference_a_diagnosis_session() {
    let store = Store::default();
    let router = app(&store);

    let diagnosis = router
        .clone()
        .oneshot(post(
            "/api/diagnosis",
            json!({ "answers": all_answers('b'), "sessionId": "session_1700000000000_abcdefghi" }),
        ))
        .await
        .expect("route executes");
    let diagnosis = json_body(diagnosis).await;
    let session_id = diagnosis["data"]["sessionId"]
        .as_str()
        .expect("session id")
        .to_string();
    assert_eq!(session_id, "session_1700000000000_abcdefghi");

    let history = router
        .clone()
        .oneshot(
            Request::get(format!("/api/diagnosis/sessions/{session_id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let history = json_body(history).await;
    assert_eq!(history["data"].as_array().map(Vec::len), Some(1));

    let consultation = router
        .oneshot(post(
            "/api/consultations",
            json!({
                "name": "박지훈",
                "phone": "010 2222 3333",
                "consultationType": "divorce_procedure",
                "preferredTime": "evening",
                "privacyAgreed": true,
                "diagnosisSessionId": session_id
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(consultation.status(), StatusCode::CREATED);

    let tickets = store.tickets.lock().expect("mutex");
    assert_eq!(tickets.len(), 1);
    assert_eq!(
        tickets[0].diagnosis_session_id.as_ref().map(|id| id.as_str()),
        Some("session_1700000000000_abcdefghi")
    );
}
