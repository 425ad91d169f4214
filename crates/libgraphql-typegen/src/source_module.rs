use crate::type_matcher::DefaultTypeMatcher;
use crate::type_matcher::TypeMatchError;
use crate::type_matcher::TypeMatcher;
use crate::type_pattern;
use crate::NamedType;
use crate::TypePattern;
use regex::Regex;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::LazyLock;

static DECLARATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*(?P<export>export[ \t]+)?(?:default[ \t]+)?",
        r"(?:declare[ \t]+)?(?:abstract[ \t]+)?(?:const[ \t]+)?",
        r"(?P<keyword>interface|type|class|enum)[ \t]+",
        r"(?P<name>[A-Za-z_$][A-Za-z0-9_$]*)",
    )).expect("declaration regex is valid")
});

/// An external code module whose declarations may back GraphQL types,
/// imported under `alias` in generated output.
#[derive(Clone, Debug)]
pub struct SourceModule {
    pub(crate) alias: String,
    pub(crate) glob: bool,
    pub(crate) import_path: Option<String>,
    pub(crate) only_types: Option<Vec<TypePattern>>,
    pub(crate) source: PathBuf,
    pub(crate) type_match: Option<Arc<dyn TypeMatcher>>,
}
impl SourceModule {
    pub fn alias(&self) -> &str {
        self.alias.as_str()
    }

    /// Whether the module is imported as a namespace (`import * as alias`)
    /// rather than as a single default export.
    pub fn glob(&self) -> bool {
        self.glob
    }

    /// The module specifier used in the generated import statement.
    ///
    /// With `relative_to` set to the directory the generated file is written
    /// into, the specifier points from that directory to `source`. The source
    /// path and the directory must share a base (both absolute, or both
    /// relative to the same directory); otherwise `source` is used as written.
    pub fn import_specifier(&self, relative_to: Option<&Path>) -> String {
        if let Some(import_path) = &self.import_path {
            return import_path.to_owned();
        }

        let path = relative_to
            .and_then(|dir| relative_path(dir, &self.source))
            .unwrap_or_else(|| self.source.to_owned());
        let specifier = path.to_string_lossy().replace('\\', "/");
        let stripped = [".d.ts", ".tsx", ".ts", ".jsx", ".js"].iter()
            .find_map(|ext| specifier.strip_suffix(ext))
            .unwrap_or(specifier.as_str());
        if path.is_absolute()
            || stripped.starts_with('/')
            || stripped.starts_with("./")
            || stripped.starts_with("../") {
            stripped.to_string()
        } else {
            format!("./{stripped}")
        }
    }

    pub fn new(source: impl AsRef<Path>, alias: impl AsRef<str>) -> Self {
        Self {
            alias: alias.as_ref().to_string(),
            glob: true,
            import_path: None,
            only_types: None,
            source: source.as_ref().to_path_buf(),
            type_match: None,
        }
    }

    pub fn only_types(&self) -> Option<&[TypePattern]> {
        self.only_types.as_deref()
    }

    /// Whether `onlyTypes` (if present) permits this module to back
    /// `type_name`.
    pub fn permits(&self, type_name: &str) -> bool {
        match &self.only_types {
            Some(only_types) => type_pattern::matches_any(only_types, type_name),
            None => true,
        }
    }

    pub fn source(&self) -> &Path {
        self.source.as_path()
    }

    pub fn type_patterns(
        &self,
        named_type: &NamedType,
    ) -> Result<Vec<Regex>, TypeMatchError> {
        let patterns = match &self.type_match {
            Some(type_match) => type_match.patterns(named_type)?,
            None => DefaultTypeMatcher.patterns(named_type)?,
        };
        if patterns.is_empty() {
            return Err(TypeMatchError::NoPatterns);
        }
        Ok(patterns)
    }

    pub fn with_glob(mut self, glob: bool) -> Self {
        self.glob = glob;
        self
    }

    pub fn with_import_path(mut self, import_path: impl AsRef<str>) -> Self {
        self.import_path = Some(import_path.as_ref().to_string());
        self
    }

    pub fn with_only_types(mut self, only_types: Vec<TypePattern>) -> Self {
        self.only_types = Some(only_types);
        self
    }

    pub fn with_type_match(mut self, type_match: impl TypeMatcher + 'static) -> Self {
        self.type_match = Some(Arc::new(type_match));
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeclarationKeyword {
    Class,
    Enum,
    Interface,
    Type,
}
impl DeclarationKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Type => "type",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(Self::Class),
            "enum" => Some(Self::Enum),
            "interface" => Some(Self::Interface),
            "type" => Some(Self::Type),
            _ => None,
        }
    }
}

/// A top-level type declaration found in a [`LoadedModule`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Declaration {
    pub exported: bool,
    pub keyword: DeclarationKeyword,
    pub name: String,
}
impl Declaration {
    /// The text patterns are matched against, e.g. `"interface User"`.
    pub fn signature(&self) -> String {
        format!("{} {}", self.keyword.as_str(), self.name)
    }
}

/// The declarations visible in one [`SourceModule`] for the duration of a
/// single build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedModule {
    declarations: Vec<Declaration>,
}
impl LoadedModule {
    pub fn declarations(&self) -> &[Declaration] {
        self.declarations.as_slice()
    }

    /// Searches declarations in source order and returns the first one any
    /// pattern matches, along with the identifier that pattern selected.
    pub fn find_declaration(&self, patterns: &[Regex]) -> Option<(&Declaration, String)> {
        for decl in &self.declarations {
            let signature = decl.signature();
            for pattern in patterns {
                if let Some(captures) = pattern.captures(&signature) {
                    let matched = captures.name("name")
                        .or_else(|| captures.get(1))
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_else(|| decl.name.clone());
                    return Some((decl, matched));
                }
            }
        }
        None
    }

    pub fn from_content(content: &str) -> Self {
        let declarations = DECLARATION_REGEX.captures_iter(content)
            .filter_map(|caps| {
                let keyword = DeclarationKeyword::from_keyword(&caps["keyword"])?;
                Some(Declaration {
                    exported: caps.name("export").is_some(),
                    keyword,
                    name: caps["name"].to_string(),
                })
            })
            .collect();
        Self { declarations }
    }

    pub fn from_declarations(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }
}

/// `path` expressed relative to `dir`. `None` when the two don't share a base
/// or when `dir` climbs out of the common prefix with `..`.
fn relative_path(dir: &Path, path: &Path) -> Option<PathBuf> {
    if dir.is_absolute() != path.is_absolute() {
        return None;
    }

    let dir_parts: Vec<Component> = dir.components()
        .filter(|part| *part != Component::CurDir)
        .collect();
    let path_parts: Vec<Component> = path.components()
        .filter(|part| *part != Component::CurDir)
        .collect();
    let common = dir_parts.iter()
        .zip(&path_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let dir_rest = &dir_parts[common..];
    if dir_rest.contains(&Component::ParentDir) {
        return None;
    }
    let mut relative: PathBuf = dir_rest.iter()
        .map(|_| Component::ParentDir)
        .collect();
    relative.extend(&path_parts[common..]);
    Some(relative)
}
