use crate::record_store::Collection;

const DEFAULT_ACCOUNTS_TABLE: &str = "CloudShrinkAccounts";
const DEFAULT_POLICIES_TABLE: &str = "CloudShrinkPolicies";
const DEFAULT_VOLUMES_TABLE: &str = "CloudShrinkVolumes";
const DEFAULT_OPERATIONS_TABLE: &str = "CloudShrinkOperations";
const DEFAULT_ROLE_NAME: &str = "CloudShrinkSatelliteRole";

#[derive(Debug, Clone, PartialEq)]
pub struct TableNames {
    pub accounts: String,
    pub policies: String,
    pub volumes: String,
    pub operations: String,
}

impl TableNames {
    pub fn table(&self, collection: Collection) -> &str {
        match collection {
            Collection::Accounts => &self.accounts,
            Collection::Policies => &self.policies,
            Collection::Volumes => &self.volumes,
            Collection::Operations => &self.operations,
        }
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            accounts: DEFAULT_ACCOUNTS_TABLE.to_string(),
            policies: DEFAULT_POLICIES_TABLE.to_string(),
            volumes: DEFAULT_VOLUMES_TABLE.to_string(),
            operations: DEFAULT_OPERATIONS_TABLE.to_string(),
        }
    }
}

/// Settings shared by every handler, read from the Lambda environment at cold start.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub tables: TableNames,
    pub satellite_role_name: String,
    pub satellite_external_id: String,
    pub state_machine_arn: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tables: TableNames::default(),
            satellite_role_name: DEFAULT_ROLE_NAME.to_string(),
            satellite_external_id: String::new(),
            state_machine_arn: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        Config {
            tables: TableNames {
                accounts: or_default("ACCOUNTS_TABLE", DEFAULT_ACCOUNTS_TABLE),
                policies: or_default("POLICIES_TABLE", DEFAULT_POLICIES_TABLE),
                volumes: or_default("VOLUMES_TABLE", DEFAULT_VOLUMES_TABLE),
                operations: or_default("OPERATIONS_TABLE", DEFAULT_OPERATIONS_TABLE),
            },
            satellite_role_name: or_default("SATELLITE_ROLE_NAME", DEFAULT_ROLE_NAME),
            satellite_external_id: get("SATELLITE_EXTERNAL_ID").unwrap_or_default(),
            state_machine_arn: get("STATE_MACHINE_ARN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, TableNames};
    use crate::record_store::Collection;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.tables.table(Collection::Volumes), "CloudShrinkVolumes");
        assert_eq!(config.satellite_role_name, "CloudShrinkSatelliteRole");
    }

    #[test]
    fn test_overrides_and_empty_values() {
        let config = Config::from_lookup(lookup(&[
            ("ACCOUNTS_TABLE", "acc"),
            ("VOLUMES_TABLE", ""),
            ("SATELLITE_EXTERNAL_ID", "shared"),
            ("STATE_MACHINE_ARN", "arn:aws:states:us-east-1:1:stateMachine:shrink"),
        ]));
        assert_eq!(
            config.tables,
            TableNames {
                accounts: "acc".to_string(),
                ..TableNames::default()
            }
        );
        assert_eq!(config.satellite_external_id, "shared");
        assert_eq!(
            config.state_machine_arn.as_deref(),
            Some("arn:aws:states:us-east-1:1:stateMachine:shrink")
        );
    }

    #[test]
    fn test_empty_state_machine_arn_is_unset() {
        let config = Config::from_lookup(lookup(&[("STATE_MACHINE_ARN", "")]));
        assert_eq!(config.state_machine_arn, None);
    }
}
