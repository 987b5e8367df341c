use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;

use crate::trust::catalog::types::CREDENTIALS_V1;

use super::types::VP_TYPE;

/// `VerifiableCredential` is one `VC` fragment embedded in the organization's presentation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct VerifiableCredential {
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    pub id: String,

    #[serde(rename = "type")]
    pub types: Vec<String>,

    #[serde(rename = "issuanceDate")]
    pub issuance_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub issuer: Option<String>,

    #[serde(rename = "schemaId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub schema_id: Option<String>,

    #[serde(rename = "credDefId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub cred_def_id: Option<String>,

    #[serde(rename = "indyIssuer")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub indy_issuer: Option<String>,

    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,
}

impl VerifiableCredential {
    pub fn new(id: String, issuance_date: String, credential_subject: Value) -> Self {
        Self {
            context: Vec::new(),
            id,
            types: Vec::new(),
            issuance_date,
            issuer: None,
            schema_id: None,
            cred_def_id: None,
            indy_issuer: None,
            credential_subject,
        }
    }

    pub fn add_context(&mut self, context: Vec<String>) -> &mut Self {
        self.context.extend(context);
        self
    }

    pub fn add_type(&mut self, types: Vec<String>) -> &mut Self {
        self.types.extend(types);
        self
    }

    pub fn set_issuer(&mut self, issuer: String) -> &mut Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn set_schema_id(&mut self, schema_id: Option<String>) -> &mut Self {
        self.schema_id = schema_id;
        self
    }

    pub fn set_cred_def_id(&mut self, cred_def_id: Option<String>) -> &mut Self {
        self.cred_def_id = cred_def_id;
        self
    }

    pub fn set_indy_issuer(&mut self, indy_issuer: Option<String>) -> &mut Self {
        self.indy_issuer = indy_issuer;
        self
    }
}

/// `VerifiablePresentation` is the bundle of every public `VC` fragment of the organization
///
/// An empty bundle is still a valid presentation, its credential list is omitted on the wire
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct VerifiablePresentation {
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    #[serde(rename = "type")]
    pub types: Vec<String>,

    #[serde(rename = "verifiableCredential")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub verifiable_credential: Vec<VerifiableCredential>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub proof: Option<Value>,
}

impl VerifiablePresentation {
    pub fn new(credentials: Vec<VerifiableCredential>) -> Self {
        Self {
            context: vec![CREDENTIALS_V1.to_string()],
            types: vec![VP_TYPE.to_string()],
            verifiable_credential: credentials,
            proof: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.proof.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_common::standard::serde_json::{self, json};

    #[test]
    fn test_empty_presentation_omits_credentials() {
        let vp = VerifiablePresentation::new(vec![]);
        let output = serde_json::to_value(&vp).unwrap();

        assert_eq!(
            output,
            json!({
                "@context": [CREDENTIALS_V1],
                "type": [VP_TYPE],
            })
        );
        assert!(!vp.is_signed());
    }

    #[test]
    fn test_fragment_wire_names() {
        let mut vc = VerifiableCredential::new(
            "urn:cred-1".to_string(),
            "2020-09-01T10:00:00Z".to_string(),
            json!({"id": "did:sov:org"}),
        );
        vc.add_type(vec!["VerifiableCredential".to_string()])
            .set_cred_def_id(Some("CHysca6fY8n8ytCDLAJGZj:3:CL:571:ba1.0".to_string()))
            .set_indy_issuer(Some("did:sov:bank".to_string()));

        let output = serde_json::to_value(&vc).unwrap();
        assert_eq!(output["credDefId"], json!("CHysca6fY8n8ytCDLAJGZj:3:CL:571:ba1.0"));
        assert_eq!(output["indyIssuer"], json!("did:sov:bank"));
        assert_eq!(output["issuanceDate"], json!("2020-09-01T10:00:00Z"));
        assert!(output.get("schemaId").is_none());
        assert!(output.get("issuer").is_none());
    }
}
