use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub table_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: "product-inventory".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["TABLE_NAME"]))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn table_name_should_come_from_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TABLE_NAME", "inventory-test");

            let config = Config::load()?;

            assert_eq!(config.table_name, "inventory-test");
            Ok(())
        });
    }

    #[test]
    fn table_name_should_default_when_unset() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TABLE_NAME", "leaked-table");
            jail.clear_env();

            let config = Config::load()?;

            assert_eq!(config.table_name, "product-inventory");
            Ok(())
        });
    }
}
