//! Incremental JSON array responses.
//!
//! Serializes a fallible stream of elements as a chunked JSON array body,
//! element-at-a-time, without collecting the result set first. This is the
//! response shape for cursor-backed listings: the client sees a regular
//! `application/json` array, the server never buffers more than one element.

use async_stream::stream;
use axum::{
    body::{Body, Bytes},
    http::header,
    response::{IntoResponse, Response},
};
use futures::{Stream, StreamExt};
use serde::Serialize;

/// Streamed JSON array response.
///
/// Wraps a `Stream<Item = Result<T, E>>` and writes `[`, the serialized
/// elements separated by commas as they arrive, then `]`.
///
/// An `Err` from the underlying stream (or a serialization failure) aborts
/// the body mid-flight; the status line has already been sent, so the client
/// observes a truncated response. Matching cursor semantics, no further
/// elements are pulled after a failure or after the client disconnects.
///
/// ```ignore
/// async fn list(State(service): State<Arc<ProductService<R>>>) -> ProductResult<impl IntoResponse> {
///     let products = service.list_products().await?;
///     Ok(JsonArrayStream(products))
/// }
/// ```
pub struct JsonArrayStream<S>(pub S);

impl<S, T, E> IntoResponse for JsonArrayStream<S>
where
    S: Stream<Item = Result<T, E>> + Send + Unpin + 'static,
    T: Serialize + Send,
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_response(self) -> Response {
        let mut elements = self.0;

        let chunks = stream! {
            yield Ok::<Bytes, axum::Error>(Bytes::from_static(b"["));

            let mut first = true;
            while let Some(element) = elements.next().await {
                let element = match element {
                    Ok(element) => element,
                    Err(e) => {
                        tracing::error!("Stream failed mid-response: {}", e);
                        yield Err(axum::Error::new(e));
                        return;
                    }
                };

                match serde_json::to_vec(&element) {
                    Ok(json) => {
                        let mut chunk = Vec::with_capacity(json.len() + 1);
                        if !first {
                            chunk.push(b',');
                        }
                        chunk.extend_from_slice(&json);
                        first = false;
                        yield Ok(Bytes::from(chunk));
                    }
                    Err(e) => {
                        tracing::error!("Failed to serialize stream element: {}", e);
                        yield Err(axum::Error::new(e));
                        return;
                    }
                }
            }

            yield Ok(Bytes::from_static(b"]"));
        };

        (
            [(header::CONTENT_TYPE, "application/json")],
            Body::from_stream(chunks),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use http_body_util::BodyExt;
    use std::convert::Infallible;

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn empty_stream_is_empty_array() {
        let elements = stream::iter(Vec::<Result<u32, Infallible>>::new());
        let response = JsonArrayStream(elements).into_response();

        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_string(response).await, "[]");
    }

    #[tokio::test]
    async fn elements_are_comma_separated() {
        let elements = stream::iter(vec![Ok::<_, Infallible>(1), Ok(2), Ok(3)]);
        let response = JsonArrayStream(elements).into_response();

        assert_eq!(body_string(response).await, "[1,2,3]");
    }

    #[tokio::test]
    async fn structs_parse_back_as_json_array() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let elements = stream::iter(vec![
            Ok::<_, Infallible>(Point { x: 1, y: 2 }),
            Ok(Point { x: 3, y: 4 }),
        ]);
        let response = JsonArrayStream(elements).into_response();

        let parsed: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["x"], 3);
    }

    #[tokio::test]
    async fn mid_stream_error_aborts_body() {
        let elements = stream::iter(vec![
            Ok(1),
            Err(std::io::Error::other("cursor lost")),
            Ok(3),
        ]);
        let response = JsonArrayStream(elements).into_response();

        // Status was already committed as 200; the body itself fails.
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert!(response.into_body().collect().await.is_err());
    }
}
