/// `schema_name` extracts the schema name from a ledger schema identifier
///
/// A schema identifier is formatted as `<issuer-did>:2:<name>:<version>`, the name is
/// always the third segment. It returns `None` when the identifier doesn't follow that format.
pub fn schema_name(schema_id: &str) -> Option<&str> {
    let segments: Vec<&str> = schema_id.split(':').collect();
    if segments.len() < 4 {
        return None;
    }

    segments.get(2).copied().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_test::table_test;

    #[test]
    fn test_schema_name() {
        let table = vec![
            ("M6Mbe3qx7vB4wpZF4sBRjt:2:bank_account:1.0", Some("bank_account")),
            ("M6Mbe3qx7vB4wpZF4sBRjt:2:masterdata:0.3", Some("masterdata")),
            ("M6Mbe3qx7vB4wpZF4sBRjt:2::1.0", None),
            ("bank_account", None),
            ("", None),
        ];

        for (validator, input, expected) in table_test!(table) {
            let name = schema_name(input);

            validator
                .given(input)
                .when("extract schema name")
                .then(&format!("{:?}", expected))
                .assert_eq(expected, name);
        }
    }
}
