//! # Namespace Builder
//!
//! Turns a template identifier and a base name into everything needed to
//! create a file: the resolved template, the validated source and target
//! paths, and the substitution [`Namespace`].
//!
//! The namespace is composed in a strict order, each layer overriding the
//! previous one:
//!
//! 1. `namespace.predefined`
//! 2. the selected entry of `namespace.keyed_set`
//! 3. answers to `namespace.prompt_for`
//! 4. generated values (`today`, `template_name`, `basename`, `title`,
//!    `full_name`, `template_filepath`, then `target_filename` and
//!    `target_filepath`)
//!
//! Paths are validated before any layer is composed, so a broken template
//! fails before the user is asked anything.
use chrono::{Local, NaiveDate};
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;
use thiserror::Error;

use crate::{
    constants::DEFAULT_PERMISSIONS,
    core::{
        config_loader::{Config, ConfigError, scalar_to_string},
        fetch::DatasetFetcher,
        namespace::Namespace,
        paths::{self, EnvLookup, PathError},
        prompt::Prompter,
        template_engine::TemplateEngine,
    },
    models::{KeyedSetSpec, NamespaceSpec, SetData, TemplateSpec},
};

const DEFAULT_KEY_PROMPT: &str = "Enter key for keyed set";

/// Failures while resolving a template or composing its namespace.
#[derive(Error, Debug)]
pub enum NamespaceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Template not found: {prefix}")]
    TemplateNotFound { prefix: String },
    #[error("Template name is not unique: {prefix} (matches {candidates})")]
    TemplateNotUnique { prefix: String, candidates: String },
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Key for data set is required!")]
    MissingKey,
    #[error("Key '{key}' not found in data set!")]
    KeyNotFound { key: String },
    #[error("Entry '{key}' of the data set is not a mapping.")]
    EntryNotMapping { key: String },
    #[error("Failed to fetch remote data from {address}: {reason}")]
    RemoteFetch { address: String, reason: String },
    #[error("Remote data from {address} is not a valid data set: {reason}")]
    InvalidRemoteData { address: String, reason: String },
    #[error("User Interface Error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Failed to render target {part} '{text}': {reason}")]
    Render {
        part: &'static str,
        text: String,
        reason: String,
    },
    #[error("Invalid permissions '{0}': expected octal digits such as \"0644\".")]
    InvalidPermissions(String),
}

type NamespaceResult<T> = Result<T, NamespaceError>;

/// Caller-supplied options for a `create` invocation.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Explicit key into the template's keyed data set.
    pub key: Option<String>,
}

/// Everything `create` needs once a template has been resolved.
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    /// Registered name the prefix resolved to.
    pub name: String,
    /// The template's configuration entry.
    pub spec: TemplateSpec,
    /// Values available to the template.
    pub namespace: Namespace,
    /// Expanded `filepath`, known to exist.
    pub source_path: PathBuf,
    /// Target directory joined with prefix, basename and suffix.
    pub target_path: PathBuf,
    /// Mode for a rendered target.
    pub permissions: u32,
}

/// Resolves a template prefix against the registered names.
///
/// An exact match always wins. Otherwise exactly one name must start with `prefix`.
pub fn resolve_template_name<'n>(
    prefix: &str,
    names: impl IntoIterator<Item = &'n str>,
) -> NamespaceResult<&'n str> {
    let mut candidates = Vec::new();
    for name in names {
        if name == prefix {
            return Ok(name);
        }
        if name.starts_with(prefix) {
            candidates.push(name);
        }
    }

    match candidates.as_slice() {
        [] => Err(NamespaceError::TemplateNotFound {
            prefix: prefix.to_string(),
        }),
        [single] => Ok(*single),
        many => Err(NamespaceError::TemplateNotUnique {
            prefix: prefix.to_string(),
            candidates: many.join(", "),
        }),
    }
}

/// `how-to_eat` becomes `How to eat`.
pub fn titleize(basename: &str) -> String {
    let spaced = basename.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Resolves templates against a configuration, asking and fetching through injected capabilities.
pub struct NamespaceBuilder<'a> {
    config: &'a Config,
    engine: &'a TemplateEngine,
    prompter: &'a mut dyn Prompter,
    fetcher: &'a dyn DatasetFetcher,
    env: &'a EnvLookup,
    today: NaiveDate,
}

impl std::fmt::Debug for NamespaceBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceBuilder")
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

impl<'a> NamespaceBuilder<'a> {
    /// A builder reading the process environment and today's local date.
    pub fn new(
        config: &'a Config,
        engine: &'a TemplateEngine,
        prompter: &'a mut dyn Prompter,
        fetcher: &'a dyn DatasetFetcher,
    ) -> Self {
        Self {
            config,
            engine,
            prompter,
            fetcher,
            env: &paths::process_env,
            today: Local::now().date_naive(),
        }
    }

    /// Replaces the environment used to expand path fields.
    pub fn with_env(mut self, env: &'a EnvLookup) -> Self {
        self.env = env;
        self
    }

    /// Pins the date exposed as `today`.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Resolves `prefix` to a template and builds its namespace for `basename`.
    pub fn resolve(
        &mut self,
        prefix: &str,
        basename: &str,
        options: &CreateOptions,
    ) -> NamespaceResult<ResolvedTemplate> {
        let templates = self.config.templates()?;
        let name = resolve_template_name(prefix, templates.iter().map(|(n, _)| n.as_str()))?
            .to_string();
        let spec = templates
            .into_iter()
            .find_map(|(n, spec)| (n == name).then_some(spec))
            .ok_or_else(|| NamespaceError::TemplateNotFound {
                prefix: prefix.to_string(),
            })?;
        log::debug!("Template prefix '{}' resolved to '{}'.", prefix, name);

        // Validate paths before asking the user anything.
        let source_path = paths::expand_path(&spec.filepath, self.env)?;
        if !source_path.is_file() {
            return Err(NamespaceError::FileNotFound(source_path));
        }
        let target_dir = paths::expand_path(&spec.target.path, self.env)?;
        if !target_dir.is_dir() {
            return Err(NamespaceError::DirectoryNotFound(target_dir));
        }

        let permissions = self.resolve_permissions(&spec)?;

        let mut namespace = Namespace::new();
        if let Some(ns_spec) = &spec.namespace {
            self.populate_config_layers(&mut namespace, ns_spec, options)?;
        }

        // Generated values always win.
        let globals = self.config.globals()?;
        namespace.insert("today", self.today);
        namespace.insert("template_name", name.as_str());
        namespace.insert("basename", basename);
        namespace.insert("title", titleize(basename));
        namespace.insert("full_name", globals.full_name.unwrap_or_default());
        namespace.insert("template_filepath", source_path.clone());
        namespace.remove("target_filename");
        namespace.remove("target_filepath");

        let target_filename = self.build_target_filename(&spec, basename, &namespace)?;
        let target_path = target_dir.join(&target_filename);
        namespace.insert("target_filename", target_filename);
        namespace.insert("target_filepath", target_path.clone());

        Ok(ResolvedTemplate {
            name,
            spec,
            namespace,
            source_path,
            target_path,
            permissions,
        })
    }

    fn populate_config_layers(
        &mut self,
        namespace: &mut Namespace,
        ns_spec: &NamespaceSpec,
        options: &CreateOptions,
    ) -> NamespaceResult<()> {
        if let Some(predefined) = &ns_spec.predefined {
            namespace.merge_mapping(predefined);
        }

        if let Some(keyed_set) = &ns_spec.keyed_set {
            let entry = self.select_keyed_entry(keyed_set, options)?;
            namespace.merge_mapping(&entry);
        }

        for prompt_spec in &ns_spec.prompt_for {
            let Some(var_name) = prompt_spec.var_name.as_deref() else {
                continue;
            };
            let prompt = prompt_spec
                .prompt
                .clone()
                .unwrap_or_else(|| format!("Value for {}", var_name));
            let answer = self.prompter.ask(&prompt, prompt_spec.default.as_deref())?;
            namespace.insert(var_name, answer);
        }

        Ok(())
    }

    /// Key priority: caller option > configured key > interactive prompt.
    fn find_valid_key(
        &mut self,
        keyed_set: &KeyedSetSpec,
        options: &CreateOptions,
    ) -> NamespaceResult<String> {
        log::debug!(
            "Keyed set key sources: option={:?}, configured={:?}",
            options.key,
            keyed_set.key
        );
        let key = match options.key.as_ref().or(keyed_set.key.as_ref()) {
            Some(key) => key.clone(),
            None => {
                let prompt = keyed_set.key_prompt.as_deref().unwrap_or(DEFAULT_KEY_PROMPT);
                self.prompter.ask(prompt, None)?
            }
        };

        // Whatever the source, a blank key selects nothing.
        let key = key.trim();
        if key.is_empty() {
            return Err(NamespaceError::MissingKey);
        }
        Ok(key.to_string())
    }

    fn select_keyed_entry(
        &mut self,
        keyed_set: &KeyedSetSpec,
        options: &CreateOptions,
    ) -> NamespaceResult<Mapping> {
        let key = self.find_valid_key(keyed_set, options)?;

        let entry = match &keyed_set.set_data {
            SetData::Inline(data) => lookup_entry(data, &key),
            SetData::Remote(address) => {
                let data = self.fetch_remote_set_data(address)?;
                lookup_entry(&data, &key)
            }
        };

        match entry {
            Some(Value::Mapping(mapping)) => Ok(mapping),
            Some(_) => Err(NamespaceError::EntryNotMapping { key }),
            None => Err(NamespaceError::KeyNotFound { key }),
        }
    }

    fn fetch_remote_set_data(&self, address: &str) -> NamespaceResult<Mapping> {
        let body = self
            .fetcher
            .fetch(address)
            .map_err(|reason| NamespaceError::RemoteFetch {
                address: address.to_string(),
                reason,
            })?;

        match serde_yaml::from_str::<Value>(&body) {
            Ok(Value::Mapping(mapping)) => Ok(mapping),
            Ok(_) => Err(NamespaceError::InvalidRemoteData {
                address: address.to_string(),
                reason: "expected a mapping of keys to entries".to_string(),
            }),
            Err(e) => Err(NamespaceError::InvalidRemoteData {
                address: address.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn build_target_filename(
        &self,
        spec: &TemplateSpec,
        basename: &str,
        namespace: &Namespace,
    ) -> NamespaceResult<String> {
        let render = |part: &'static str, raw: Option<&str>| -> NamespaceResult<String> {
            let text = raw.unwrap_or_default();
            self.engine
                .render_namespace(text, namespace)
                .map_err(|reason| NamespaceError::Render {
                    part,
                    text: text.to_string(),
                    reason,
                })
        };

        let prefix = render("prefix", spec.target.prefix.as_deref())?;
        let suffix = render("suffix", spec.target.suffix.as_deref())?;
        Ok(format!("{}{}{}", prefix, basename, suffix))
    }

    /// Template permissions > global permissions > built-in default.
    fn resolve_permissions(&self, spec: &TemplateSpec) -> NamespaceResult<u32> {
        let configured = match &spec.target.permissions {
            Some(p) => Some(p.clone()),
            None => self.config.globals()?.permissions,
        };

        match configured {
            None => Ok(DEFAULT_PERMISSIONS),
            Some(p) => p
                .mode()
                .ok_or_else(|| NamespaceError::InvalidPermissions(format!("{:?}", p))),
        }
    }
}

fn lookup_entry(data: &Mapping, key: &str) -> Option<Value> {
    data.iter()
        .find(|(k, _)| scalar_to_string(k).as_deref() == Some(key))
        .map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::namespace::NamespaceValue;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    // --- Test doubles ---

    #[derive(Default)]
    struct ScriptedPrompter {
        answers: VecDeque<String>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn with_answers(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|s| s.to_string()).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String, dialoguer::Error> {
            self.asked.push(prompt.to_string());
            match self.answers.pop_front() {
                Some(answer) if !answer.is_empty() => Ok(answer),
                _ => Ok(default.unwrap_or_default().to_string()),
            }
        }
    }

    struct StubFetcher {
        body: Result<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                body: Err(reason.to_string()),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl DatasetFetcher for StubFetcher {
        fn fetch(&self, address: &str) -> Result<String, String> {
            self.requested.borrow_mut().push(address.to_string());
            self.body.clone()
        }
    }

    // --- Fixture ---

    struct Fixture {
        _dir: TempDir,
        root: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = dir.path().to_path_buf();
            fs::create_dir_all(root.join("templates")).unwrap();
            fs::create_dir_all(root.join("out")).unwrap();
            fs::write(root.join("templates/script.sh.hbs"), "{{basename}}").unwrap();
            fs::write(root.join("templates/sprint.org.hbs"), "* {{title}}").unwrap();
            Self { _dir: dir, root }
        }

        fn env(&self) -> impl Fn(&str) -> Option<String> + use<> {
            let root = self.root.display().to_string();
            move |name: &str| (name == "FIXTURE").then(|| root.clone())
        }

        fn config(&self, templates: &str) -> Config {
            let yaml = format!(
                "globals:\n  full_name: Devin Devmeister\ncommands:\n  templates:\n    create:\n{}",
                templates
            );
            Config::from_yaml_str(&yaml).unwrap()
        }
    }

    const TODAY: (i32, u32, u32) = (2024, 3, 7);

    fn resolve_with(
        config: &Config,
        env: &EnvLookup,
        prompter: &mut ScriptedPrompter,
        fetcher: &StubFetcher,
        prefix: &str,
        basename: &str,
        options: &CreateOptions,
    ) -> NamespaceResult<ResolvedTemplate> {
        let engine = TemplateEngine::new();
        let mut builder = NamespaceBuilder::new(config, &engine, prompter, fetcher)
            .with_env(env)
            .with_today(NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap());
        builder.resolve(prefix, basename, options)
    }

    const BASIC: &str = r#"
      bash:
        filepath: $FIXTURE/templates/script.sh.hbs
        target:
          path: ${FIXTURE}/out
      sprint:
        filepath: $FIXTURE/templates/sprint.org.hbs
        target:
          path: $FIXTURE/out
          suffix: .org
      isprint:
        filepath: $FIXTURE/templates/sprint.org.hbs
        target:
          path: $FIXTURE/out
"#;

    // --- Name resolution ---

    #[test]
    fn test_resolve_name_exact_and_unique_prefix() {
        let names = ["sprint", "isprint", "zet", "bash", "python"];
        assert_eq!(resolve_template_name("bash", names).unwrap(), "bash");
        assert_eq!(resolve_template_name("ba", names).unwrap(), "bash");
        assert_eq!(resolve_template_name("i", names).unwrap(), "isprint");
    }

    #[test]
    fn test_resolve_name_not_found() {
        let result = resolve_template_name("ruby", ["bash", "python"]);
        assert!(matches!(result, Err(NamespaceError::TemplateNotFound { .. })));
    }

    #[test]
    fn test_resolve_name_ambiguous() {
        let result = resolve_template_name("p", ["python", "perl", "bash"]);
        match result {
            Err(NamespaceError::TemplateNotUnique { candidates, .. }) => {
                assert_eq!(candidates, "python, perl");
            }
            other => panic!("expected ambiguity error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_name_exact_match_beats_longer_names() {
        let result = resolve_template_name("zet", ["zettel", "zet"]);
        assert_eq!(result.unwrap(), "zet");
    }

    #[test]
    fn test_titleize() {
        assert_eq!(titleize("how-to_eat-Dessert"), "How to eat dessert");
        assert_eq!(titleize("bob"), "Bob");
        assert_eq!(titleize(""), "");
    }

    // --- Full resolution ---

    #[test]
    fn test_resolve_basic_template() {
        let fx = Fixture::new();
        let config = fx.config(BASIC);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");

        let resolved = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "ba",
            "bob",
            &CreateOptions::default(),
        )
        .unwrap();

        assert_eq!(resolved.name, "bash");
        assert_eq!(resolved.source_path, fx.root.join("templates/script.sh.hbs"));
        assert_eq!(resolved.target_path, fx.root.join("out/bob"));
        assert_eq!(resolved.permissions, DEFAULT_PERMISSIONS);

        let ns = &resolved.namespace;
        assert_eq!(ns.get_str("basename").as_deref(), Some("bob"));
        assert_eq!(ns.get_str("title").as_deref(), Some("Bob"));
        assert_eq!(ns.get_str("template_name").as_deref(), Some("bash"));
        assert_eq!(ns.get_str("full_name").as_deref(), Some("Devin Devmeister"));
        assert_eq!(ns.get_str("today").as_deref(), Some("2024-03-07"));
        assert_eq!(ns.get_str("target_filename").as_deref(), Some("bob"));
        assert_eq!(
            ns.get("target_filepath"),
            Some(&NamespaceValue::Path(fx.root.join("out/bob")))
        );
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_suffix_is_appended() {
        let fx = Fixture::new();
        let config = fx.config(BASIC);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");

        let resolved = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "sprint",
            "current",
            &CreateOptions::default(),
        )
        .unwrap();

        assert_eq!(resolved.target_path, fx.root.join("out/current.org"));
    }

    #[test]
    fn test_ambiguous_prefix_is_rejected() {
        let fx = Fixture::new();
        let config = fx.config(BASIC);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");

        // "sprint" and "isprint" share no prefix, but "s" only matches "sprint".
        let ok = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "s",
            "x",
            &CreateOptions::default(),
        );
        assert_eq!(ok.unwrap().name, "sprint");

        let config = fx.config(&format!(
            "{}      bashful:\n        filepath: $FIXTURE/templates/script.sh.hbs\n        target:\n          path: $FIXTURE/out\n",
            BASIC
        ));
        let err = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "bas",
            "x",
            &CreateOptions::default(),
        );
        assert!(matches!(err, Err(NamespaceError::TemplateNotUnique { .. })));
    }

    #[test]
    fn test_missing_source_fails_before_prompting() {
        let fx = Fixture::new();
        let config = fx.config(
            r#"
      broken:
        filepath: $FIXTURE/templates/missing.hbs
        target:
          path: $FIXTURE/out
        namespace:
          prompt_for:
            - var_name: goal
"#,
        );
        let env = fx.env();
        let mut prompter = ScriptedPrompter::with_answers(&["never"]);
        let fetcher = StubFetcher::ok("");

        let result = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "broken",
            "x",
            &CreateOptions::default(),
        );

        assert!(matches!(result, Err(NamespaceError::FileNotFound(_))));
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_missing_target_directory() {
        let fx = Fixture::new();
        let config = fx.config(
            r#"
      nowhere:
        filepath: $FIXTURE/templates/script.sh.hbs
        target:
          path: $FIXTURE/does-not-exist
"#,
        );
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");

        let result = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "nowhere",
            "x",
            &CreateOptions::default(),
        );
        assert!(matches!(result, Err(NamespaceError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_undefined_env_var_in_path() {
        let fx = Fixture::new();
        let config = fx.config(
            r#"
      unset:
        filepath: $UNDEFINED_FOR_TEST/x.hbs
        target:
          path: /tmp
"#,
        );
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");

        let result = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "unset",
            "x",
            &CreateOptions::default(),
        );
        assert!(matches!(
            result,
            Err(NamespaceError::Path(PathError::UndefinedVariable { .. }))
        ));
    }

    // --- Layering ---

    const LAYERED: &str = r#"
      sprint:
        filepath: $FIXTURE/templates/sprint.org.hbs
        target:
          path: $FIXTURE/out
          prefix: "{{sprint}}-"
          suffix: .org
          permissions: "0600"
        namespace:
          predefined:
            owner: predefined-owner
            team: core
          keyed_set:
            set_data:
              default:
                sprint: 41
                team: default-team
                template_name: hijacked
              next:
                sprint: 42
            key: default
            key_prompt: Which sprint?
          prompt_for:
            - var_name: owner
              prompt: Who owns it?
              default: default-owner
            - prompt: no variable, skipped
"#;

    #[test]
    fn test_layer_precedence() {
        let fx = Fixture::new();
        let config = fx.config(LAYERED);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::with_answers(&["alice"]);
        let fetcher = StubFetcher::ok("");

        let resolved = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "sprint",
            "review",
            &CreateOptions::default(),
        )
        .unwrap();
        let ns = &resolved.namespace;

        // prompt_for beats predefined
        assert_eq!(ns.get_str("owner").as_deref(), Some("alice"));
        // keyed_set beats predefined
        assert_eq!(ns.get_str("team").as_deref(), Some("default-team"));
        // generated values beat everything
        assert_eq!(ns.get_str("template_name").as_deref(), Some("sprint"));
        assert_eq!(prompter.asked, vec!["Who owns it?"]);
        assert_eq!(resolved.permissions, 0o600);
        assert_eq!(resolved.target_path, fx.root.join("out/41-review.org"));
    }

    #[test]
    fn test_prompt_default_is_used_on_empty_answer() {
        let fx = Fixture::new();
        let config = fx.config(LAYERED);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::with_answers(&[""]);
        let fetcher = StubFetcher::ok("");

        let resolved = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "sprint",
            "review",
            &CreateOptions::default(),
        )
        .unwrap();
        assert_eq!(
            resolved.namespace.get_str("owner").as_deref(),
            Some("default-owner")
        );
    }

    #[test]
    fn test_explicit_key_beats_configured_key() {
        let fx = Fixture::new();
        let config = fx.config(LAYERED);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");
        let options = CreateOptions {
            key: Some("next".to_string()),
        };

        let resolved =
            resolve_with(&config, &env, &mut prompter, &fetcher, "sprint", "r", &options).unwrap();

        assert_eq!(resolved.namespace.get_str("sprint").as_deref(), Some("42"));
        // "next" has no team, so the predefined one survives.
        assert_eq!(resolved.namespace.get_str("team").as_deref(), Some("core"));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let fx = Fixture::new();
        let config = fx.config(LAYERED);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");
        let options = CreateOptions {
            key: Some("someday".to_string()),
        };

        let result = resolve_with(&config, &env, &mut prompter, &fetcher, "sprint", "r", &options);
        match result {
            Err(NamespaceError::KeyNotFound { key }) => assert_eq!(key, "someday"),
            other => panic!("expected KeyNotFound, got {:?}", other),
        }
    }

    const PROMPTED_KEY: &str = r#"
      isprint:
        filepath: $FIXTURE/templates/sprint.org.hbs
        target:
          path: $FIXTURE/out
        namespace:
          keyed_set:
            set_data:
              "2024-03-07":
                sprint: 7
            key_prompt: Enter deploy date key
"#;

    #[test]
    fn test_key_is_prompted_when_not_configured() {
        let fx = Fixture::new();
        let config = fx.config(PROMPTED_KEY);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::with_answers(&["2024-03-07"]);
        let fetcher = StubFetcher::ok("");

        let resolved = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "isprint",
            "r",
            &CreateOptions::default(),
        )
        .unwrap();

        assert_eq!(prompter.asked, vec!["Enter deploy date key"]);
        assert_eq!(resolved.namespace.get_str("sprint").as_deref(), Some("7"));
    }

    #[test]
    fn test_empty_prompted_key_is_an_error() {
        let fx = Fixture::new();
        let config = fx.config(PROMPTED_KEY);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::with_answers(&["   "]);
        let fetcher = StubFetcher::ok("");

        let result = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "isprint",
            "r",
            &CreateOptions::default(),
        );
        assert!(matches!(result, Err(NamespaceError::MissingKey)));
    }

    #[test]
    fn test_blank_explicit_key_is_missing() {
        let fx = Fixture::new();
        let config = fx.config(LAYERED);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");
        let options = CreateOptions {
            key: Some(String::new()),
        };

        let result = resolve_with(&config, &env, &mut prompter, &fetcher, "sprint", "r", &options);
        assert!(matches!(result, Err(NamespaceError::MissingKey)));
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_blank_configured_key_is_missing() {
        let fx = Fixture::new();
        let config = fx.config(
            r#"
      isprint:
        filepath: $FIXTURE/templates/sprint.org.hbs
        target:
          path: $FIXTURE/out
        namespace:
          keyed_set:
            set_data:
              now:
                sprint: 1
            key: "  "
"#,
        );
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");

        let result = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "isprint",
            "r",
            &CreateOptions::default(),
        );
        assert!(matches!(result, Err(NamespaceError::MissingKey)));
    }

    // --- Remote data sets ---

    const REMOTE: &str = r#"
      remote:
        filepath: $FIXTURE/templates/sprint.org.hbs
        target:
          path: $FIXTURE/out
        namespace:
          keyed_set:
            set_data: https://example.com/sprints.yaml
            key: current
"#;

    #[test]
    fn test_remote_data_set_is_fetched_and_indexed() {
        let fx = Fixture::new();
        let config = fx.config(REMOTE);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("current:\n  sprint: 99\n  goal: ship\n");

        let resolved = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "remote",
            "r",
            &CreateOptions::default(),
        )
        .unwrap();

        assert_eq!(
            fetcher.requested.borrow().as_slice(),
            ["https://example.com/sprints.yaml"]
        );
        assert_eq!(resolved.namespace.get_str("goal").as_deref(), Some("ship"));
    }

    #[test]
    fn test_remote_fetch_failure_names_the_address() {
        let fx = Fixture::new();
        let config = fx.config(REMOTE);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::failing("unexpected HTTP status 404 Not Found");

        let err = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "remote",
            "r",
            &CreateOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, NamespaceError::RemoteFetch { .. }));
        assert!(err.to_string().contains("https://example.com/sprints.yaml"));
    }

    #[test]
    fn test_remote_body_must_be_a_mapping() {
        let fx = Fixture::new();
        let config = fx.config(REMOTE);
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("- just\n- a list\n");

        let result = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "remote",
            "r",
            &CreateOptions::default(),
        );
        assert!(matches!(result, Err(NamespaceError::InvalidRemoteData { .. })));
    }

    #[test]
    fn test_global_permissions_are_the_fallback() {
        let fx = Fixture::new();
        let yaml = format!(
            "globals:\n  permissions: \"0640\"\ncommands:\n  templates:\n    create:\n{}",
            BASIC
        );
        let config = Config::from_yaml_str(&yaml).unwrap();
        let env = fx.env();
        let mut prompter = ScriptedPrompter::default();
        let fetcher = StubFetcher::ok("");

        let resolved = resolve_with(
            &config,
            &env,
            &mut prompter,
            &fetcher,
            "bash",
            "x",
            &CreateOptions::default(),
        )
        .unwrap();
        assert_eq!(resolved.permissions, 0o640);
        assert_eq!(resolved.namespace.get_str("full_name").as_deref(), Some(""));
    }
}
