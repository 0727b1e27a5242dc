use async_graphql::http::{GraphiQLSource, parse_query_string};
use async_graphql::parser::types::{DocumentOperations, OperationType};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::{RawQuery, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;

use super::schema::{LibrarySchema, execute};
use crate::config::ServerSettings;
use crate::error::Result;

#[derive(Clone)]
struct ServerState {
    schema: LibrarySchema,
    endpoint: String,
    graphiql: bool,
}

/// Build the router serving the schema at `settings.path`.
///
/// POST takes a JSON request body. GET takes the request in the query
/// string, and serves the GraphiQL explorer when there is none.
pub fn router(schema: LibrarySchema, settings: &ServerSettings) -> Router {
    let state = ServerState {
        schema,
        endpoint: settings.path.clone(),
        graphiql: settings.graphiql,
    };

    Router::new()
        .route(&settings.path, get(graphql_get).post(graphql_post))
        .with_state(state)
}

async fn graphql_post(State(state): State<ServerState>, req: GraphQLRequest) -> GraphQLResponse {
    execute(&state.schema, req.into_inner()).await.into()
}

async fn graphql_get(State(state): State<ServerState>, RawQuery(query): RawQuery) -> Response {
    match query.filter(|q| !q.is_empty()) {
        Some(query) => match parse_query_string(&query) {
            Ok(mut request) => {
                if is_mutation(&mut request) {
                    return (
                        StatusCode::METHOD_NOT_ALLOWED,
                        [(header::ALLOW, "POST")],
                        "Can only perform a mutation operation from a POST request.",
                    )
                        .into_response();
                }
                GraphQLResponse::from(execute(&state.schema, request).await).into_response()
            }
            Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        },
        None if state.graphiql => {
            Html(GraphiQLSource::build().endpoint(&state.endpoint).finish()).into_response()
        }
        None => (StatusCode::BAD_REQUEST, "Missing GraphQL query").into_response(),
    }
}

/// Whether the operation the request selects is a mutation.
///
/// Unparsable documents and unknown operation names are left to the executor
/// to report.
fn is_mutation(request: &mut async_graphql::Request) -> bool {
    let operation_name = request.operation_name.clone();
    let Ok(document) = request.parsed_query() else {
        return false;
    };
    let operation = match (&document.operations, operation_name) {
        (DocumentOperations::Single(op), _) => Some(op),
        (DocumentOperations::Multiple(ops), Some(name)) => ops.get(name.as_str()),
        (DocumentOperations::Multiple(ops), None) if ops.len() == 1 => ops.values().next(),
        (DocumentOperations::Multiple(_), None) => None,
    };
    operation.is_some_and(|op| op.node.ty == OperationType::Mutation)
}

/// Bind the listener and serve until the process is stopped.
pub async fn run_server(schema: LibrarySchema, settings: &ServerSettings) -> Result<()> {
    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, path = %settings.path, "GraphQL server listening");

    axum::serve(listener, router(schema, settings)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::build_schema;
    use crate::storage::MemoryRepository;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router(graphiql: bool) -> Router {
        let schema = build_schema(Arc::new(MemoryRepository::with_sample_data()));
        let settings = ServerSettings {
            graphiql,
            ..ServerSettings::default()
        };
        router(schema, &settings)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_executes_query() {
        let request = Request::post("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "query": "{ book(id: 4) { name author { name } } }" }).to_string(),
            ))
            .unwrap();

        let response = test_router(true).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "book": { "name": "Jkl", "author": { "name": "B" } } } })
        );
    }

    #[tokio::test]
    async fn test_post_with_variables() {
        let request = Request::post("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "query": "query Find($id: Int) { author(id: $id) { name } }",
                    "variables": { "id": 3 }
                })
                .to_string(),
            ))
            .unwrap();

        let response = test_router(true).oneshot(request).await.unwrap();
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "author": { "name": "C" } } })
        );
    }

    #[tokio::test]
    async fn test_get_with_query_string_executes_query() {
        let request = Request::get("/graphql?query=%7B%20authors%20%7B%20name%20%7D%20%7D")
            .body(Body::empty())
            .unwrap();

        let response = test_router(true).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "authors": [{ "name": "A" }, { "name": "B" }, { "name": "C" }] } })
        );
    }

    #[tokio::test]
    async fn test_validation_errors_are_reported_in_errors_key() {
        let request = Request::post("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "query": "{ nope }" }).to_string()))
            .unwrap();

        let response = test_router(true).oneshot(request).await.unwrap();
        let body = body_json(response).await;
        assert!(body["errors"][0]["message"].is_string());
    }

    #[tokio::test]
    async fn test_get_rejects_mutation() {
        let router = test_router(true);

        let add = Request::get(
            "/graphql?query=mutation%20%7B%20addBook(name%3A%20%22G%22%2C%20authorId%3A%201)%20%7B%20id%20%7D%20%7D",
        )
        .body(Body::empty())
        .unwrap();
        let response = router.clone().oneshot(add).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");

        let count = Request::get("/graphql?query=%7B%20books%20%7B%20id%20%7D%20%7D")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(count).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["books"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_get_selects_named_query_among_operations() {
        let router = test_router(true);

        // Document holding both a query and a mutation; only the query may run over GET.
        let document = "query%20Q%20%7B%20authors%20%7B%20id%20%7D%20%7D%20mutation%20M%20%7B%20addBook(name%3A%20%22G%22%2C%20authorId%3A%201)%20%7B%20id%20%7D%20%7D";

        let query = Request::get(format!("/graphql?query={}&operationName=Q", document))
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(query).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mutation = Request::get(format!("/graphql?query={}&operationName=M", document))
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(mutation).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_get_without_query_serves_graphiql() {
        let request = Request::get("/graphql").body(Body::empty()).unwrap();

        let response = test_router(true).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("graphiql"));
    }

    #[tokio::test]
    async fn test_get_without_query_rejected_when_graphiql_disabled() {
        let request = Request::get("/graphql").body(Body::empty()).unwrap();

        let response = test_router(false).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mutation_is_visible_to_next_request() {
        let router = test_router(true);

        let add = Request::post("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "query": "mutation { addBook(name: \"X\", authorId: 2) { id } }" })
                    .to_string(),
            ))
            .unwrap();
        let response = router.clone().oneshot(add).await.unwrap();
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "addBook": { "id": 9 } } })
        );

        let list = Request::post("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "query": "{ author(id: 2) { books { name } } }" }).to_string(),
            ))
            .unwrap();
        let response = router.oneshot(list).await.unwrap();
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "author": { "books": [
                { "name": "Jkl" }, { "name": "Mno" }, { "name": "Pqr" }, { "name": "X" }
            ] } } })
        );
    }
}
