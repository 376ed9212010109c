use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

const DEFAULT_SETTINGS: [(&str, &str);
  3] = [
  (
    "events.file",
    "~/.arcade/events.json"
  ),
  ("default.command", "list"),
  ("color", "on")
];

const MAX_INCLUDE_DEPTH: usize = 8;

enum Line<'a> {
  Blank,
  Include(&'a str),
  Pair(&'a str, &'a str),
  Malformed
}

#[derive(Debug, Clone, Default)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Config {
  #[tracing::instrument(skip(
    arcaderc_override
  ))]
  pub fn load(
    arcaderc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::default();
    for (key, value) in
      DEFAULT_SETTINGS
    {
      cfg.map.insert(
        key.to_string(),
        value.to_string()
      );
    }

    match resolve_arcaderc_path(
      arcaderc_override
    )? {
      | Some(path) => {
        info!(arcaderc = %path.display(), "loading arcaderc");
        cfg.load_file(&path, 0)?;
      }
      | None => {
        warn!(
          "running on built-in \
           defaults, no arcaderc"
        );
      }
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let key = match key
        .strip_prefix("rc.")
      {
        | Some(bare) => {
          bare.to_string()
        }
        | None => key
      };
      debug!(key = %key, value = %value, "applying override");
      self.map.insert(key, value);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = (&String, &String)>
  {
    self.map.iter()
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path,
    depth: usize
  ) -> anyhow::Result<()> {
    if depth > MAX_INCLUDE_DEPTH {
      return Err(anyhow!(
        "include chain too deep at {}",
        path.display()
      ));
    }

    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "cannot read config \
             file {}",
            path.display()
          )
        })?;
    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .unwrap_or(Path::new("."));

    for (idx, raw_line) in
      text.lines().enumerate()
    {
      match classify_line(raw_line) {
        | Line::Blank => {}
        | Line::Include(target) => {
          let target =
            resolve_include_path(
              base_dir, target
            )?;
          debug!(
            file = %path.display(),
            include = %target.display(),
            line = idx + 1,
            "following include"
          );
          if target.is_file() {
            self.load_file(
              &target,
              depth + 1
            )?;
          } else {
            warn!(include = %target.display(), "skipping missing include");
          }
        }
        | Line::Pair(key, value) => {
          trace!(
            key,
            value,
            "arcaderc entry"
          );
          self.map.insert(
            key.to_string(),
            value.to_string()
          );
        }
        | Line::Malformed => {
          return Err(anyhow!(
            "{}:{} is not a \
             key=value line: \
             {raw_line}",
            path.display(),
            idx + 1
          ));
        }
      }
    }

    Ok(())
  }
}

fn classify_line(
  raw: &str
) -> Line<'_> {
  let line =
    match raw.split_once('#') {
      | Some((code, _)) => {
        code.trim()
      }
      | None => raw.trim()
    };

  if line.is_empty() {
    return Line::Blank;
  }
  if let Some(target) =
    line.strip_prefix("include ")
  {
    return Line::Include(
      target.trim()
    );
  }
  match line.split_once('=') {
    | Some((key, value)) => {
      Line::Pair(
        key.trim(),
        value.trim()
      )
    }
    | None => Line::Malformed
  }
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_arcaderc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Some(raw) =
    std::env::var_os("ARCADERC")
  {
    let path = PathBuf::from(raw);
    let keep = path.as_path()
      != Path::new("/dev/null");
    return Ok(keep.then_some(path));
  }

  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "home directory is not \
         available"
      )
    })?;
  Ok(
    Some(home.join(".arcaderc"))
      .filter(|rc| rc.is_file())
  )
}

fn resolve_include_path(
  base_dir: &Path,
  target: &str
) -> anyhow::Result<PathBuf> {
  if target.is_empty() {
    return Err(anyhow!(
      "include directive needs a path"
    ));
  }

  let expanded =
    expand_tilde(Path::new(target));
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

pub(crate) fn expand_tilde(
  path: &Path
) -> PathBuf {
  let Ok(rest) =
    path.strip_prefix("~")
  else {
    return path.to_path_buf();
  };
  match dirs::home_dir() {
    | Some(home) => home.join(rest),
    | None => path.to_path_buf()
  }
}
