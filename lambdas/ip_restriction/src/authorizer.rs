use crate::config::Config;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const POLICY_VERSION: &str = "2012-10-17";
const INVOKE_ACTION: &str = "execute-api:Invoke";

/// The part of an API Gateway authorizer event this function reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorizerRequest {
    pub method_arn: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

// operator -> condition key -> values
type PolicyCondition = BTreeMap<String, BTreeMap<String, Vec<String>>>;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PolicyStatement {
    pub effect: String,
    pub action: String,
    pub resource: String,
    pub condition: PolicyCondition,
}

/// Allows the invocation, conditioned on the caller's source IP. API Gateway
/// evaluates the condition, so every request gets the same policy.
pub(crate) async fn function_handler(
    config: &Config,
    event: LambdaEvent<AuthorizerRequest>,
) -> Result<AuthorizerResponse, Error> {
    let method_arn = event.payload.method_arn;
    tracing::debug!("Authorizing {}", method_arn);

    let condition = BTreeMap::from([(
        "IpAddress".to_string(),
        BTreeMap::from([(
            "aws:SourceIp".to_string(),
            config.allowed_source_ips.clone(),
        )]),
    )]);

    Ok(AuthorizerResponse {
        principal_id: config.principal_id.clone(),
        policy_document: PolicyDocument {
            version: POLICY_VERSION.to_string(),
            statement: vec![PolicyStatement {
                effect: "Allow".to_string(),
                action: INVOKE_ACTION.to_string(),
                resource: method_arn,
                condition,
            }],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::{function_handler, AuthorizerRequest};
    use crate::config::Config;
    use lambda_runtime::{Context, LambdaEvent};
    use serde_json::json;

    const METHOD_ARN: &str = "arn:aws:execute-api:ap-northeast-1:123456789012:abcdef123/prod/GET/hello";

    fn config() -> Config {
        Config {
            allowed_source_ips: vec!["59.159.121.218/24".to_string(), "59.158.121.0/24".to_string()],
            principal_id: "ip-restriction".to_string(),
        }
    }

    fn create_lambda_event(payload: serde_json::Value) -> LambdaEvent<AuthorizerRequest> {
        let request: AuthorizerRequest = serde_json::from_value(payload).unwrap();
        LambdaEvent::new(request, Context::default())
    }

    #[tokio::test]
    async fn when_request_arrives_should_allow_invoke_from_configured_ranges() {
        let event = create_lambda_event(json!({
            "type": "REQUEST",
            "methodArn": METHOD_ARN,
            "headers": {"Host": "example.com"}
        }));

        let result = function_handler(&config(), event).await;

        assert!(result.is_ok());
        assert_eq!(
            serde_json::to_value(result.unwrap()).unwrap(),
            json!({
                "principalId": "ip-restriction",
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Effect": "Allow",
                        "Action": "execute-api:Invoke",
                        "Resource": METHOD_ARN,
                        "Condition": {
                            "IpAddress": {
                                "aws:SourceIp": ["59.159.121.218/24", "59.158.121.0/24"]
                            }
                        }
                    }]
                }
            })
        );
    }

    #[tokio::test]
    async fn when_principal_is_configured_should_use_it() {
        let mut config = config();
        config.principal_id = "office-network".to_string();
        let event = create_lambda_event(json!({"methodArn": METHOD_ARN}));

        let response = function_handler(&config, event).await.unwrap();

        assert_eq!(response.principal_id, "office-network");
        assert_eq!(response.policy_document.statement.len(), 1);
        assert_eq!(response.policy_document.statement[0].resource, METHOD_ARN);
    }

    #[test]
    fn when_method_arn_is_missing_should_reject_event() {
        let result = serde_json::from_value::<AuthorizerRequest>(json!({"type": "TOKEN"}));

        assert!(result.is_err());
    }
}
