use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::{self, Map, Value};

use crate::trust::catalog::SubjectShape;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct BankAccount {
    pub iban: String,
    pub bic: String,
}

/// `BankAccountSubject` binds a bank account to its holder's `DID`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct BankAccountSubject {
    pub id: String,

    #[serde(rename = "bankAccount")]
    pub bank_account: BankAccount,
}

/// `CredentialPayload` is the part of the agent's credential object read by the aggregator
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct CredentialPayload {
    #[serde(default)]
    pub schema_id: Option<String>,

    #[serde(default)]
    pub cred_def_id: Option<String>,

    #[serde(default)]
    pub attrs: Option<Map<String, Value>>,
}

impl CredentialPayload {
    pub fn parse(payload: &Value) -> Result<Self, String> {
        if !payload.is_object() {
            return Err("credential payload is not a JSON object".to_string());
        }

        serde_json::from_value(payload.to_owned()).map_err(|err| err.to_string())
    }
}

fn bank_account_subject(holder: &str, fields: Value) -> Result<Value, String> {
    let bank_account: BankAccount =
        serde_json::from_value(fields).map_err(|err| format!("invalid bank account: {}", err))?;

    let subject = BankAccountSubject {
        id: holder.to_string(),
        bank_account,
    };

    serde_json::to_value(subject).map_err(|err| err.to_string())
}

impl SubjectShape {
    /// document_subject builds the subject of a document fragment, the subject always
    /// identifies the organization itself
    pub fn document_subject(&self, document: &Value, my_did: &str) -> Result<Value, String> {
        match self {
            SubjectShape::Generic => {
                let mut subject = document
                    .as_object()
                    .cloned()
                    .ok_or_else(|| "document payload is not a JSON object".to_string())?;

                subject.remove("id");
                subject.insert("id".to_string(), Value::String(my_did.to_string()));
                Ok(Value::Object(subject))
            }
            SubjectShape::BankAccount => bank_account_subject(my_did, document.to_owned()),
        }
    }

    /// credential_subject builds the subject of an issued credential fragment
    pub fn credential_subject(
        &self,
        credential: &Value,
        payload: &CredentialPayload,
        my_did: &str,
    ) -> Result<Value, String> {
        match self {
            SubjectShape::Generic => Ok(credential.to_owned()),
            SubjectShape::BankAccount => {
                let attrs = payload
                    .attrs
                    .clone()
                    .ok_or_else(|| "credential attrs are missing".to_string())?;

                bank_account_subject(my_did, Value::Object(attrs))
            }
        }
    }
}
