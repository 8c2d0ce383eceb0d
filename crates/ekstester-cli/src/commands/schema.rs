//! Schema command

use ekstester_config::Config;

use crate::Result;

pub fn run() -> Result<()> {
    println!("{}", schema_json()?);
    Ok(())
}

fn schema_json() -> Result<String> {
    let schema = schemars::schema_for!(Config);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_describes_kebab_case_document() {
        let schema: serde_json::Value = serde_json::from_str(&schema_json().unwrap()).unwrap();

        let properties = &schema["properties"];
        assert!(properties.get("add-on-managed-node-groups").is_some());
        assert!(properties.get("log-outputs").is_some());
        assert!(schema["definitions"].get("ManagedNodeGroup").is_some());
    }
}
