use crate::domain::model::{SqlValue, Statement, StatementResult};
use crate::domain::ports::Database;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// libSQL 相容服務的 HTTP pipeline 用戶端
#[derive(Debug, Clone)]
pub struct RemoteDatabase {
    client: Client,
    pipeline_url: String,
    auth_token: Option<String>,
}

impl RemoteDatabase {
    pub fn new(url: &str, auth_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            pipeline_url: pipeline_url(url),
            auth_token: auth_token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn pipeline_url(&self) -> &str {
        &self.pipeline_url
    }
}

/// `libsql://` is the same service over HTTPS.
fn pipeline_url(url: &str) -> String {
    let base = match url.strip_prefix("libsql://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    };
    format!("{}/v2/pipeline", base.trim_end_matches('/'))
}

fn encode_arg(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => json!({"type": "null"}),
        // 整數以字串傳送，避免 JSON 精度問題
        SqlValue::Integer(i) => json!({"type": "integer", "value": i.to_string()}),
        SqlValue::Text(s) => json!({"type": "text", "value": s}),
    }
}

fn encode_stmt(stmt: &Statement) -> Value {
    json!({
        "sql": stmt.sql,
        "args": stmt.args.iter().map(encode_arg).collect::<Vec<_>>(),
    })
}

fn encode_pipeline(statements: &[Statement]) -> Value {
    let mut requests: Vec<Value> = statements
        .iter()
        .map(|stmt| json!({"type": "execute", "stmt": encode_stmt(stmt)}))
        .collect();
    requests.push(json!({"type": "close"}));
    json!({ "requests": requests })
}

/// BEGIN, each statement only if the previous step succeeded, COMMIT, and a
/// ROLLBACK that runs whenever the COMMIT did not.
fn encode_transaction(statements: &[Statement]) -> Value {
    let commit_step = statements.len() + 1;
    let mut steps = Vec::with_capacity(statements.len() + 3);
    steps.push(json!({"stmt": encode_stmt(&Statement::new("BEGIN"))}));
    for (index, stmt) in statements.iter().enumerate() {
        steps.push(json!({
            "condition": {"type": "ok", "step": index},
            "stmt": encode_stmt(stmt),
        }));
    }
    steps.push(json!({
        "condition": {"type": "ok", "step": commit_step - 1},
        "stmt": encode_stmt(&Statement::new("COMMIT")),
    }));
    steps.push(json!({
        "condition": {"type": "not", "cond": {"type": "ok", "step": commit_step}},
        "stmt": encode_stmt(&Statement::new("ROLLBACK")),
    }));

    json!({
        "requests": [
            {"type": "batch", "batch": {"steps": steps}},
            {"type": "close"}
        ]
    })
}

#[derive(Debug, Deserialize)]
struct PipelineResponse {
    results: Vec<PipelineResult>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PipelineResult {
    Ok { response: StreamResponse },
    Error { error: RemoteError },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamResponse {
    Execute { result: ExecuteResult },
    Batch { result: BatchResult },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ExecuteResult {
    #[serde(default)]
    rows: Vec<Vec<RemoteValue>>,
    #[serde(default)]
    affected_row_count: u64,
}

#[derive(Debug, Deserialize)]
struct BatchResult {
    step_results: Vec<Option<ExecuteResult>>,
    step_errors: Vec<Option<RemoteError>>,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RemoteValue {
    Null,
    Integer { value: String },
    Float { value: f64 },
    Text { value: String },
    Blob { base64: String },
}

impl From<RemoteValue> for Value {
    fn from(value: RemoteValue) -> Self {
        match value {
            RemoteValue::Null => Value::Null,
            RemoteValue::Integer { value } => value
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::String(value)),
            RemoteValue::Float { value } => json!(value),
            RemoteValue::Text { value } => Value::String(value),
            RemoteValue::Blob { base64 } => Value::String(base64),
        }
    }
}

impl From<ExecuteResult> for StatementResult {
    fn from(result: ExecuteResult) -> Self {
        StatementResult {
            affected_rows: result.affected_row_count,
            rows: result
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(Value::from).collect())
                .collect(),
        }
    }
}

fn statement_error(index: usize, error: &RemoteError, sql: &str) -> AppError {
    AppError::DatabaseError {
        message: format!(
            "statement {} failed ({}): {} [{}]",
            index,
            error.code.as_deref().unwrap_or("UNKNOWN"),
            error.message,
            sql.split_whitespace().collect::<Vec<_>>().join(" ")
        ),
    }
}

impl RemoteDatabase {
    async fn send(&self, body: &Value) -> Result<Vec<PipelineResult>> {
        let mut request = self.client.post(&self.pipeline_url).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::DatabaseError {
                message: format!("HTTP {}: {}", status, text.trim()),
            });
        }

        let parsed: PipelineResponse = response.json().await?;
        Ok(parsed.results)
    }
}

#[async_trait]
impl Database for RemoteDatabase {
    async fn execute_batch(&self, statements: Vec<Statement>) -> Result<Vec<StatementResult>> {
        tracing::debug!(
            "Sending {} statement(s) to {}",
            statements.len(),
            self.pipeline_url
        );
        let pipeline = self.send(&encode_pipeline(&statements)).await?;
        let mut results: Vec<StatementResult> = Vec::with_capacity(statements.len());

        for (index, result) in pipeline.into_iter().enumerate() {
            match result {
                PipelineResult::Ok {
                    response: StreamResponse::Execute { result },
                } => results.push(result.into()),
                PipelineResult::Ok { .. } => {}
                PipelineResult::Error { error } => {
                    let sql = statements
                        .get(index)
                        .map(|s| s.sql.as_str())
                        .unwrap_or("<close>");
                    return Err(statement_error(index, &error, sql));
                }
            }
        }

        if results.len() != statements.len() {
            return Err(AppError::DatabaseError {
                message: format!(
                    "expected {} results, got {}",
                    statements.len(),
                    results.len()
                ),
            });
        }

        Ok(results)
    }

    async fn execute_transaction(
        &self,
        statements: Vec<Statement>,
    ) -> Result<Vec<StatementResult>> {
        tracing::debug!(
            "Sending transaction of {} statement(s) to {}",
            statements.len(),
            self.pipeline_url
        );
        let pipeline = self.send(&encode_transaction(&statements)).await?;

        let batch = match pipeline.into_iter().next() {
            Some(PipelineResult::Ok {
                response: StreamResponse::Batch { result },
            }) => result,
            Some(PipelineResult::Error { error }) => {
                return Err(AppError::DatabaseError {
                    message: format!("transaction rejected: {}", error.message),
                })
            }
            _ => {
                return Err(AppError::DatabaseError {
                    message: "transaction returned no batch result".to_string(),
                })
            }
        };

        // step 0 是 BEGIN，語句從 step 1 開始
        if let Some((step, error)) = batch
            .step_errors
            .iter()
            .enumerate()
            .find_map(|(step, e)| e.as_ref().map(|e| (step, e)))
        {
            let sql = match step {
                0 => "BEGIN",
                s if s <= statements.len() => statements[s - 1].sql.as_str(),
                s if s == statements.len() + 1 => "COMMIT",
                _ => "ROLLBACK",
            };
            return Err(statement_error(step.saturating_sub(1), error, sql));
        }

        let results: Vec<StatementResult> = batch
            .step_results
            .into_iter()
            .skip(1)
            .take(statements.len())
            .map(|r| r.map(StatementResult::from).unwrap_or_default())
            .collect();

        if results.len() != statements.len() {
            return Err(AppError::DatabaseError {
                message: format!(
                    "expected {} results, got {}",
                    statements.len(),
                    results.len()
                ),
            });
        }
        Ok(results)
    }
}
