use std::{fs, path::Path};

use super::{ConfigError, ConfigPaths};
use crate::core::alias::AliasStore;
use crate::core::env::{EnvError, EnvStore};

/// Reads the startup rc file. Understands `export NAME=VALUE`, `PATH=VALUE`
/// and `alias name='value'`; anything else is ignored.
pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn load_into(&self, env: &mut EnvStore, aliases: &mut AliasStore) -> Result<(), ConfigError> {
        self.source_if_exists(&self.paths.rc_path, env, aliases)
    }

    fn source_if_exists(
        &self,
        path: &Path,
        env: &mut EnvStore,
        aliases: &mut AliasStore,
    ) -> Result<(), ConfigError> {
        if !path.exists() {
            if self.paths.explicit_rc {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
                });
            }
            tracing::debug!(path = %path.display(), "no rc file");
            return Ok(());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        for (index, line) in content.lines().enumerate() {
            self.process_line(line, env, aliases)
                .map_err(|source| ConfigError::Env {
                    path: path.display().to_string(),
                    line: index + 1,
                    source,
                })?;
        }
        tracing::debug!(path = %path.display(), "loaded rc file");
        Ok(())
    }

    fn process_line(
        &self,
        line: &str,
        env: &mut EnvStore,
        aliases: &mut AliasStore,
    ) -> Result<(), EnvError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        if let Some(var_def) = line.strip_prefix("export ") {
            return self.process_env_var(var_def, env);
        }
        if line.starts_with("PATH=") {
            return self.process_env_var(line, env);
        }
        if let Some(alias_def) = line.strip_prefix("alias ") {
            self.process_alias(alias_def, aliases);
            return Ok(());
        }

        tracing::debug!(line, "ignoring rc line");
        Ok(())
    }

    fn process_env_var(&self, var_def: &str, env: &mut EnvStore) -> Result<(), EnvError> {
        if let Some((name, value)) = var_def.split_once('=') {
            let value = unquote(value.trim());
            let expanded = env.expand_value(value).into_owned();
            env.set(name.trim(), &expanded)?;
        }
        Ok(())
    }

    fn process_alias(&self, alias_def: &str, aliases: &mut AliasStore) {
        if let Some((name, command)) = alias_def.split_once('=') {
            let name = name.trim();
            if !name.is_empty() {
                aliases.set(name, unquote(command.trim()));
            }
        }
    }
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2
        && ((value.starts_with('\'') && value.ends_with('\''))
            || (value.starts_with('"') && value.ends_with('"')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
