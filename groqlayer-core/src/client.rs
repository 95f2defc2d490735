//! Query client façade.
//!
//! [`QueryClient`] turns a schema or composed query into GROQ, sends it through the injected
//! [`Fetcher`], and validates the response against the query's resolved schema. What happens on a
//! validation failure is controlled by [`ValidationMode`].
//!
//! # Example
//!
//! ```ignore
//! use groqlayer::client::{QueryClient, ValidationMode};
//! use groqlayer::query::filter_by_type;
//! use groqlayer::schema::Node;
//!
//! let client = QueryClient::builder(fetcher)
//!     .validation_mode(ValidationMode::Warn)
//!     .build();
//!
//! let movies = filter_by_type("movie").grab(Node::projection([("title", Node::string())]));
//! let response = client.fetch(&movies, None).await?;
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    decode::{DecodeFailure, Decoder, ShapeDecoder, ValidationIssue, decode_as},
    error::{GroqError, GroqResult},
    fetch::{Fetcher, Params},
    query::{ArrayQuery, EntityQuery},
    schema::Node,
};

/// What the client does with a response that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationMode {
    /// Log at error level and fail with [`GroqError::Validation`].
    #[default]
    Error,
    /// Log at warn level and return the unvalidated response.
    Warn,
    /// Return the unvalidated response without logging.
    Silent,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Error => "ERROR",
            ValidationMode::Warn => "WARN",
            ValidationMode::Silent => "SILENT",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = GroqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Ok(ValidationMode::Error),
            "WARN" => Ok(ValidationMode::Warn),
            "SILENT" => Ok(ValidationMode::Silent),
            _ => Err(GroqError::InvalidValidationMode(s.to_string())),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientOptions {
    pub validation_mode: ValidationMode,
}

/// Anything the client can turn into a GROQ query with a known result schema.
pub trait GroqSource {
    /// Returns the complete query string.
    fn to_groq(&self) -> GroqResult<String>;

    /// Returns the schema the response is validated against.
    fn result_schema(&self) -> Node;
}

/// A bare node is queried against the whole dataset: `*` + its serialization.
impl GroqSource for Node {
    fn to_groq(&self) -> GroqResult<String> {
        let groq = self.serialize();

        if groq.is_empty() {
            return Err(GroqError::MissingQuery);
        }

        Ok(format!("*{groq}"))
    }

    fn result_schema(&self) -> Node {
        self.clone()
    }
}

impl GroqSource for ArrayQuery {
    fn to_groq(&self) -> GroqResult<String> {
        Ok(self.serialize())
    }

    fn result_schema(&self) -> Node {
        self.resolve_schema()
    }
}

impl GroqSource for EntityQuery {
    fn to_groq(&self) -> GroqResult<String> {
        Ok(self.serialize())
    }

    fn result_schema(&self) -> Node {
        self.resolve_schema()
    }
}

impl<S: GroqSource + ?Sized> GroqSource for &S {
    fn to_groq(&self) -> GroqResult<String> {
        (**self).to_groq()
    }

    fn result_schema(&self) -> Node {
        (**self).result_schema()
    }
}

/// Sends queries through a [`Fetcher`] and validates the responses.
#[derive(Debug)]
pub struct QueryClient<F: Fetcher, D: Decoder = ShapeDecoder> {
    fetcher: F,
    decoder: D,
    options: ClientOptions,
}

/// A client over a type-erased fetcher.
pub type DynQueryClient = QueryClient<Box<dyn Fetcher>>;

impl<F: Fetcher> QueryClient<F> {
    /// Creates a client with default options and the shape decoder.
    pub fn new(fetcher: F) -> Self {
        QueryClient::builder(fetcher).build()
    }

    pub fn builder(fetcher: F) -> QueryClientBuilder<F> {
        QueryClientBuilder::new(fetcher)
    }
}

impl<F: Fetcher, D: Decoder> QueryClient<F, D> {
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Fetches `source` and returns the response once it has passed validation.
    ///
    /// A null response is always accepted. In [`ValidationMode::Warn`] and
    /// [`ValidationMode::Silent`] the response is returned even when validation fails.
    ///
    /// # Errors
    ///
    /// - [`GroqError::MissingQuery`] when the source serializes to nothing; no fetch is made
    /// - any error from the fetcher, unchanged
    /// - [`GroqError::Validation`] in [`ValidationMode::Error`]
    pub async fn fetch<S>(&self, source: &S, params: Option<&Params>) -> GroqResult<Value>
    where
        S: GroqSource + ?Sized,
    {
        let query = source.to_groq()?;
        debug!(query = %query, params = ?params, "Sending GROQ query");

        let response = self.fetcher.fetch(&query, params).await?;
        debug!(response = %response, "Received GROQ response");

        let schema = Node::nullable(source.result_schema());

        match self.decoder.decode(&schema, response) {
            Ok(value) => Ok(value),
            Err(DecodeFailure { issues, value }) => self.on_invalid(issues).map(|()| value),
        }
    }

    /// Fetches `source` and deserializes the validated response into `T`.
    ///
    /// Deserialization failures are reported as [`GroqError::Validation`] regardless of mode,
    /// since there is no value of `T` to fall back to.
    pub async fn fetch_as<T, S>(&self, source: &S, params: Option<&Params>) -> GroqResult<T>
    where
        T: DeserializeOwned,
        S: GroqSource + ?Sized,
    {
        let value = self.fetch(source, params).await?;

        decode_as(value).map_err(|issue| {
            let issues = vec![issue];
            error!(errors = ?issues, "GROQ response could not be deserialized.");
            GroqError::Validation(issues)
        })
    }

    fn on_invalid(&self, issues: Vec<ValidationIssue>) -> GroqResult<()> {
        match self.options.validation_mode {
            ValidationMode::Error => {
                error!(errors = ?issues, "GROQ response failed validation.");
                Err(GroqError::Validation(issues))
            }
            ValidationMode::Warn => {
                warn!(errors = ?issues, "GROQ response failed validation (\"WARN\" mode).");
                Ok(())
            }
            ValidationMode::Silent => Ok(()),
        }
    }
}

/// Builder for [`QueryClient`].
#[derive(Debug)]
pub struct QueryClientBuilder<F: Fetcher, D: Decoder = ShapeDecoder> {
    fetcher: F,
    decoder: D,
    options: ClientOptions,
}

impl<F: Fetcher> QueryClientBuilder<F> {
    pub fn new(fetcher: F) -> Self {
        QueryClientBuilder {
            fetcher,
            decoder: ShapeDecoder,
            options: ClientOptions::default(),
        }
    }
}

impl<F: Fetcher, D: Decoder> QueryClientBuilder<F, D> {
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.options.validation_mode = mode;
        self
    }

    /// Replaces the response decoder.
    pub fn decoder<E: Decoder>(self, decoder: E) -> QueryClientBuilder<F, E> {
        QueryClientBuilder {
            fetcher: self.fetcher,
            decoder,
            options: self.options,
        }
    }

    pub fn build(self) -> QueryClient<F, D> {
        QueryClient {
            fetcher: self.fetcher,
            decoder: self.decoder,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use serde_json::json;
    use tracing::{Level, subscriber::DefaultGuard};
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::{
        fetch::fetch_fn,
        query::filter_by_type,
        schema::CollectionOptions,
    };

    fn respond_with(response: Value) -> impl Fetcher + 'static {
        fetch_fn(move |_, _| std::future::ready(Ok(response.clone())))
    }

    /// Collects formatted log lines in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn install(&self) -> DefaultGuard {
            let subscriber = tracing_subscriber::fmt()
                .with_writer(self.clone())
                .with_max_level(Level::WARN)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    async fn logs_for_invalid_response(mode: ValidationMode) -> (GroqResult<Value>, String) {
        let logs = LogBuffer::default();
        let _guard = logs.install();
        let client = QueryClient::builder(respond_with(json!([{"_type": "none"}])))
            .validation_mode(mode)
            .build();

        let result = client.fetch(&movies(), None).await;
        (result, logs.contents())
    }

    fn movies() -> Node {
        Node::collection_with(
            Node::projection([
                ("title", Node::string()),
                ("director", Node::projection([("name", Node::string())])),
            ]),
            CollectionOptions::new().filter(r#"_type == "movie""#),
        )
    }

    #[test]
    fn node_source_prefixes_dataset() {
        assert_eq!(
            movies().to_groq().unwrap(),
            r#"*[_type == "movie"]{_key,...@{title,director{name}}}"#
        );
    }

    #[test]
    fn leaf_source_has_no_query() {
        assert!(matches!(Node::string().to_groq(), Err(GroqError::MissingQuery)));
    }

    #[test]
    fn validation_mode_parses_case_insensitively() {
        assert_eq!("warn".parse::<ValidationMode>().unwrap(), ValidationMode::Warn);
        assert_eq!("SILENT".parse::<ValidationMode>().unwrap(), ValidationMode::Silent);
        assert!(matches!(
            "loud".parse::<ValidationMode>(),
            Err(GroqError::InvalidValidationMode(mode)) if mode == "loud"
        ));
        assert_eq!(ValidationMode::default().to_string(), "ERROR");
    }

    #[test]
    fn options_deserialize_from_camel_case() {
        let options: ClientOptions = serde_json::from_value(json!({"validationMode": "WARN"})).unwrap();

        assert_eq!(options.validation_mode, ValidationMode::Warn);
        assert_eq!(
            serde_json::from_value::<ClientOptions>(json!({})).unwrap(),
            ClientOptions::default()
        );
    }

    #[tokio::test]
    async fn returns_valid_response() {
        let response = json!([{"_key": null, "title": "Alien", "director": {"name": "Ridley Scott"}}]);
        let client = QueryClient::new(respond_with(response.clone()));

        assert_eq!(client.fetch(&movies(), None).await.unwrap(), response);
    }

    #[tokio::test]
    async fn null_response_is_always_valid() {
        let client = QueryClient::new(respond_with(Value::Null));

        assert_eq!(client.fetch(&movies(), None).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn invalid_response_fails_in_error_mode() {
        let client = QueryClient::new(respond_with(json!([{"_type": "none"}])));

        let err = client.fetch(&movies(), None).await.unwrap_err();

        assert!(matches!(err, GroqError::Validation(_)));
        assert_eq!(
            err.issues().iter().map(|issue| issue.path.as_str()).collect::<Vec<_>>(),
            vec!["/0/title", "/0/director"]
        );
    }

    #[tokio::test]
    async fn invalid_response_passes_through_in_warn_and_silent_modes() {
        for mode in [ValidationMode::Warn, ValidationMode::Silent] {
            let client = QueryClient::builder(respond_with(json!([{"_type": "none"}])))
                .validation_mode(mode)
                .build();

            assert_eq!(
                client.fetch(&movies(), None).await.unwrap(),
                json!([{"_type": "none"}])
            );
        }
    }

    #[tokio::test]
    async fn error_mode_logs_an_error_event() {
        let (result, logs) = logs_for_invalid_response(ValidationMode::Error).await;

        assert!(result.is_err());
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("GROQ response failed validation."), "{logs}");
        assert!(logs.contains("/0/title"), "{logs}");
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[tokio::test]
    async fn warn_mode_logs_a_warning_with_the_issue_list() {
        let (result, logs) = logs_for_invalid_response(ValidationMode::Warn).await;

        assert_eq!(result.unwrap(), json!([{"_type": "none"}]));
        assert!(logs.contains("WARN"), "{logs}");
        assert!(
            logs.contains(r#"GROQ response failed validation ("WARN" mode)."#),
            "{logs}"
        );
        assert!(logs.contains("errors="), "{logs}");
        assert!(logs.contains("/0/title"), "{logs}");
        assert!(logs.contains("/0/director"), "{logs}");
        assert!(!logs.contains("ERROR"), "{logs}");
    }

    #[tokio::test]
    async fn silent_mode_logs_nothing() {
        let (result, logs) = logs_for_invalid_response(ValidationMode::Silent).await;

        assert_eq!(result.unwrap(), json!([{"_type": "none"}]));
        assert!(logs.is_empty(), "{logs}");
    }

    #[tokio::test]
    async fn valid_response_logs_nothing() {
        let logs = LogBuffer::default();
        let _guard = logs.install();
        let response = json!([{"_key": "a", "title": "Alien", "director": {"name": "Ridley Scott"}}]);
        let client = QueryClient::new(respond_with(response.clone()));

        assert_eq!(client.fetch(&movies(), None).await.unwrap(), response);
        assert!(logs.contents().is_empty());
    }

    #[tokio::test]
    async fn missing_query_skips_the_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let client = QueryClient::new(fetch_fn(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(Value::Null) }
        }));

        let err = client.fetch(&Node::string(), None).await.unwrap_err();

        assert!(matches!(err, GroqError::MissingQuery));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetch_errors_propagate() {
        let client = QueryClient::new(fetch_fn(|_, _| async {
            Err(GroqError::Fetch("connection reset".to_string()))
        }));

        let err = client.fetch(&filter_by_type("movie"), None).await.unwrap_err();

        assert!(matches!(err, GroqError::Fetch(message) if message == "connection reset"));
    }

    #[tokio::test]
    async fn entity_query_result_is_validated_as_single_value() {
        let query = filter_by_type("movie")
            .grab(Node::projection([("title", Node::string())]))
            .first();
        let client = QueryClient::new(respond_with(json!({"title": "Heat"})));

        assert_eq!(client.fetch(&query, None).await.unwrap(), json!({"title": "Heat"}));
    }

    #[tokio::test]
    async fn fetch_as_deserializes() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Movie {
            title: String,
        }

        let query = filter_by_type("movie").grab(Node::projection([("title", Node::string())]));
        let client = QueryClient::new(respond_with(json!([{"title": "Heat"}])));

        let movies: Vec<Movie> = client.fetch_as(&query, None).await.unwrap();

        assert_eq!(movies, vec![Movie { title: "Heat".to_string() }]);
    }

    #[tokio::test]
    async fn dyn_client_accepts_boxed_fetcher() {
        let fetcher: Box<dyn Fetcher> = Box::new(respond_with(Value::Null));
        let client: DynQueryClient = QueryClient::new(fetcher);

        assert_eq!(client.fetch(&movies(), None).await.unwrap(), Value::Null);
    }
}
