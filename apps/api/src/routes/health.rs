use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and the active tagger.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillex",
        "tagger": state.engine.tagger_name(),
        "ontology_terms": state.engine.ontology().entries().len()
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::engine::SkillEngine;
    use crate::extraction::ontology::Ontology;
    use crate::extraction::settings::ExtractionConfig;
    use crate::extraction::tagger::PatternOnlyTagger;
    use crate::routes::build_router;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_health_reports_tagger() {
        let engine = SkillEngine::new(
            Arc::new(Ontology::builtin().unwrap()),
            Arc::new(PatternOnlyTagger),
            ExtractionConfig::default(),
        )
        .unwrap();
        let state = AppState {
            engine: Arc::new(engine),
            config: Config::default(),
        };

        let response = build_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["tagger"], "pattern");
    }
}
