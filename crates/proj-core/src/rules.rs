//! Module loader rules
//!
//! Rules map source files to the loaders that process them:
//!
//! ```json
//! {
//!   "rules": [
//!     {
//!       "test": "\\.js$",
//!       "exclude": "node_modules",
//!       "use": [{ "loader": "babel-loader", "options": { "presets": [] } }]
//!     },
//!     { "test": ["\\.css$", "\\.scss$"], "use": "css-loader" }
//!   ]
//! }
//! ```
//!
//! `test`, `include` and `exclude` take one regular expression or a list.
//! `use` takes a loader reference, a `{ loader, options }` object, or a list
//! of either.

use crate::{Error, Result};
use proj_config::{ConfigTree, Loader, ModuleResolver, ResolvedModule};
use proj_fs::NormalizedPath;
use regex::Regex;
use serde_json::{Map, Value};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// A loader attached to a rule.
///
/// The reference is resolved when the rules are built; the loader itself is
/// only loaded on the first [`exec`](Self::exec), so inspecting rules never
/// requires a runnable loader.
#[derive(Clone)]
pub struct LoaderUse {
    /// The loader reference as configured
    pub loader: String,
    /// Options passed to the loader; an empty object by default
    pub options: Value,
    /// Where the loader reference resolved to
    pub resolved_module: ResolvedModule,
    resolver: Rc<dyn ModuleResolver>,
    loaded: OnceCell<Rc<dyn Loader>>,
}

impl LoaderUse {
    /// Run the loader on `source` with its configured options.
    ///
    /// Fails with a resolution error when the resolver cannot load the module.
    pub fn exec(&self, source: &str) -> proj_config::Result<String> {
        let loader = match self.loaded.get() {
            Some(loader) => loader,
            None => {
                let loader = self.resolver.load(&self.resolved_module)?;
                tracing::debug!(loader = %self.loader, "Loaded loader");
                self.loaded.get_or_init(|| loader)
            }
        };
        loader.exec(source, &self.options)
    }
}

impl fmt::Debug for LoaderUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderUse")
            .field("loader", &self.loader)
            .field("options", &self.options)
            .field("resolved_module", &self.resolved_module)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Rule {
    test: Vec<Regex>,
    include: Vec<Regex>,
    exclude: Vec<Regex>,
    uses: Vec<LoaderUse>,
}

impl Rule {
    fn matches(&self, path: &str) -> bool {
        self.test.iter().any(|re| re.is_match(path))
            && (self.include.is_empty() || self.include.iter().any(|re| re.is_match(path)))
            && !self.exclude.iter().any(|re| re.is_match(path))
    }
}

/// The configured rules, in declaration order.
#[derive(Debug, Default)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    /// Compile patterns and resolve every loader reference.
    ///
    /// Loader references resolve from the project root. Loading is deferred
    /// to [`LoaderUse::exec`].
    pub fn resolve(
        tree: &ConfigTree,
        root: &NormalizedPath,
        resolver: &Rc<dyn ModuleResolver>,
    ) -> Result<Self> {
        let entries = match tree.get("rules") {
            None => return Ok(Self::default()),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(Error::invalid_field("rules", "expected a list")),
        };

        let mut rules = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Value::Object(entry) = entry else {
                return Err(Error::invalid_field(
                    format!("rules[{index}]"),
                    "expected an object",
                ));
            };

            let test = patterns(entry, "test", index)?;
            if test.is_empty() {
                return Err(Error::invalid_field(
                    format!("rules[{index}].test"),
                    "at least one pattern is required",
                ));
            }

            let mut uses = Vec::new();
            for (loader, options) in loader_entries(entry, index)? {
                let resolved_module = resolver.resolve(&loader, root)?;
                tracing::debug!(rule = index, %loader, path = %resolved_module.path, "Resolved loader");
                uses.push(LoaderUse {
                    loader,
                    options,
                    resolved_module,
                    resolver: Rc::clone(resolver),
                    loaded: OnceCell::new(),
                });
            }

            rules.push(Rule {
                test,
                include: patterns(entry, "include", index)?,
                exclude: patterns(entry, "exclude", index)?,
                uses,
            });
        }

        Ok(Self { rules })
    }

    /// Loaders of every rule matching `file`, in declaration order.
    ///
    /// `file` is a project-relative path; it is matched in posix form.
    pub fn loaders_for_file(&self, file: &str) -> Vec<&LoaderUse> {
        let path = NormalizedPath::new(file);
        self.rules
            .iter()
            .filter(|rule| rule.matches(path.as_posix()))
            .flat_map(|rule| rule.uses.iter())
            .collect()
    }

    /// Every loader of every rule.
    pub fn all_loaders(&self) -> impl Iterator<Item = &LoaderUse> {
        self.rules.iter().flat_map(|rule| rule.uses.iter())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn patterns(entry: &Map<String, Value>, key: &str, index: usize) -> Result<Vec<Regex>> {
    let field = || format!("rules[{index}].{key}");
    let sources: Vec<&str> = match entry.get(key) {
        None => Vec::new(),
        Some(Value::String(pattern)) => vec![pattern.as_str()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| Error::invalid_field(field(), "patterns must be strings"))
            })
            .collect::<Result<_>>()?,
        Some(_) => {
            return Err(Error::invalid_field(
                field(),
                "expected a pattern or a list of patterns",
            ));
        }
    };

    sources
        .into_iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| Error::InvalidPattern {
                rule: index,
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

fn loader_entries(entry: &Map<String, Value>, index: usize) -> Result<Vec<(String, Value)>> {
    let field = format!("rules[{index}].use");
    let items: Vec<&Value> = match entry.get("use") {
        None => return Err(Error::invalid_field(field, "a loader is required")),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item) => vec![item],
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(loader) => Ok((loader.clone(), Value::Object(Map::new()))),
            Value::Object(declared) => {
                let loader = declared
                    .get("loader")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::invalid_field(&field, "'loader' must be a string"))?;
                let options = match declared.get("options") {
                    None => Value::Object(Map::new()),
                    Some(options @ Value::Object(_)) => options.clone(),
                    Some(_) => {
                        return Err(Error::invalid_field(&field, "'options' must be an object"));
                    }
                };
                Ok((loader.to_string(), options))
            }
            _ => Err(Error::invalid_field(
                &field,
                "expected a loader reference or a { loader, options } object",
            )),
        })
        .collect()
}
