use std::path::PathBuf;

use figment::Jail;
use ripple_config::RippleConfig;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("RIPPLE_CORPUS__ROOT", "/srv/docs");
        jail.set_env("RIPPLE_LLM__API_KEY", "env-key");
        jail.set_env("RIPPLE_WATCH__QUEUE_CAPACITY", "3");

        let config = RippleConfig::load().expect("config loads");
        assert_eq!(config.corpus.root, PathBuf::from("/srv/docs"));
        assert_eq!(config.llm.api_key, "env-key");
        assert_eq!(config.watch.queue_capacity, 3);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".ripple")?;
        jail.create_file(
            ".ripple/config.toml",
            r#"
[state]
path = "from-toml.json"
"#,
        )?;
        jail.set_env("RIPPLE_STATE__PATH", "from-env.json");

        let config = RippleConfig::load().expect("config loads");
        assert_eq!(config.state.path, PathBuf::from("from-env.json"));
        Ok(())
    });
}
