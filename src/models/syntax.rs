//! ECMAScript editions, syntax features and grammar failures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ECMAScript edition used as the compatibility bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcmaVersion {
    #[default]
    Es5,
    #[serde(alias = "es6")]
    Es2015,
    #[serde(alias = "es7")]
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Es2023,
    Es2024,
}

impl EcmaVersion {
    pub const ALL: [EcmaVersion; 11] = [
        EcmaVersion::Es5,
        EcmaVersion::Es2015,
        EcmaVersion::Es2016,
        EcmaVersion::Es2017,
        EcmaVersion::Es2018,
        EcmaVersion::Es2019,
        EcmaVersion::Es2020,
        EcmaVersion::Es2021,
        EcmaVersion::Es2022,
        EcmaVersion::Es2023,
        EcmaVersion::Es2024,
    ];

    /// Edition year, with ES5 reported as 2009
    pub fn year(self) -> u16 {
        match self {
            EcmaVersion::Es5 => 2009,
            EcmaVersion::Es2015 => 2015,
            EcmaVersion::Es2016 => 2016,
            EcmaVersion::Es2017 => 2017,
            EcmaVersion::Es2018 => 2018,
            EcmaVersion::Es2019 => 2019,
            EcmaVersion::Es2020 => 2020,
            EcmaVersion::Es2021 => 2021,
            EcmaVersion::Es2022 => 2022,
            EcmaVersion::Es2023 => 2023,
            EcmaVersion::Es2024 => 2024,
        }
    }
}

impl fmt::Display for EcmaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcmaVersion::Es5 => write!(f, "ES5"),
            other => write!(f, "ES{}", other.year()),
        }
    }
}

impl FromStr for EcmaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let digits = normalized.strip_prefix("es").unwrap_or(&normalized);

        let version = match digits {
            "5" | "2009" => EcmaVersion::Es5,
            "6" | "2015" => EcmaVersion::Es2015,
            "7" | "2016" => EcmaVersion::Es2016,
            "8" | "2017" => EcmaVersion::Es2017,
            "9" | "2018" => EcmaVersion::Es2018,
            "10" | "2019" => EcmaVersion::Es2019,
            "11" | "2020" => EcmaVersion::Es2020,
            "12" | "2021" => EcmaVersion::Es2021,
            "13" | "2022" => EcmaVersion::Es2022,
            "14" | "2023" => EcmaVersion::Es2023,
            "15" | "2024" => EcmaVersion::Es2024,
            _ => return Err(format!("Invalid ECMAScript target: {}", s)),
        };

        Ok(version)
    }
}

/// How the entry script is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Classic script (CommonJS entry points)
    Script,
    /// ES module (`.mjs` or `"type": "module"`)
    Module,
}

/// A syntax construct together with the edition that introduced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxFeature {
    LetConst,
    ArrowFunction,
    Class,
    TemplateLiteral,
    TaggedTemplate,
    Destructuring,
    DefaultValue,
    RestElement,
    SpreadElement,
    ForOf,
    Generator,
    ShorthandProperty,
    ObjectMethod,
    ComputedProperty,
    Super,
    NewTarget,
    BinaryOctalLiteral,
    CodePointEscape,
    RegExpStickyUnicode,
    ModuleSyntax,
    ExponentOperator,
    AsyncFunction,
    TrailingComma,
    ObjectRestSpread,
    AsyncIteration,
    RegExpDotAll,
    RegExpNamedGroups,
    RegExpLookbehind,
    OptionalCatchBinding,
    OptionalChaining,
    NullishCoalescing,
    BigInt,
    DynamicImport,
    ImportMeta,
    LogicalAssignment,
    NumericSeparator,
    ClassFields,
    PrivateName,
    ClassStaticBlock,
    PrivateIn,
    RegExpIndices,
    Hashbang,
    RegExpUnicodeSets,
    UsingDeclaration,
}

impl SyntaxFeature {
    /// Edition that standardised this feature; `None` if no finished edition has it
    pub fn introduced_in(self) -> Option<EcmaVersion> {
        use SyntaxFeature::*;

        let version = match self {
            LetConst | ArrowFunction | Class | TemplateLiteral | TaggedTemplate | Destructuring
            | DefaultValue | RestElement | SpreadElement | ForOf | Generator | ShorthandProperty
            | ObjectMethod | ComputedProperty | Super | NewTarget | BinaryOctalLiteral
            | CodePointEscape | RegExpStickyUnicode | ModuleSyntax => EcmaVersion::Es2015,
            ExponentOperator => EcmaVersion::Es2016,
            AsyncFunction | TrailingComma => EcmaVersion::Es2017,
            ObjectRestSpread | AsyncIteration | RegExpDotAll | RegExpNamedGroups | RegExpLookbehind => {
                EcmaVersion::Es2018
            }
            OptionalCatchBinding => EcmaVersion::Es2019,
            OptionalChaining | NullishCoalescing | BigInt | DynamicImport | ImportMeta => EcmaVersion::Es2020,
            LogicalAssignment | NumericSeparator => EcmaVersion::Es2021,
            ClassFields | PrivateName | ClassStaticBlock | PrivateIn | RegExpIndices => EcmaVersion::Es2022,
            Hashbang => EcmaVersion::Es2023,
            RegExpUnicodeSets => EcmaVersion::Es2024,
            UsingDeclaration => return None,
        };

        Some(version)
    }

    /// Whether code targeting `target` may use this feature
    pub fn allowed_in(self, target: EcmaVersion) -> bool {
        matches!(self.introduced_in(), Some(version) if version <= target)
    }

    /// Human-readable name, plural where that reads naturally
    pub fn description(self) -> &'static str {
        use SyntaxFeature::*;

        match self {
            LetConst => "let/const declarations",
            ArrowFunction => "arrow functions",
            Class => "classes",
            TemplateLiteral => "template literals",
            TaggedTemplate => "tagged templates",
            Destructuring => "destructuring",
            DefaultValue => "default values in bindings",
            RestElement => "rest elements",
            SpreadElement => "spread syntax",
            ForOf => "for-of loops",
            Generator => "generators",
            ShorthandProperty => "shorthand properties",
            ObjectMethod => "method definitions",
            ComputedProperty => "computed property names",
            Super => "super",
            NewTarget => "new.target",
            BinaryOctalLiteral => "binary and octal literals",
            CodePointEscape => "unicode code point escapes",
            RegExpStickyUnicode => "regular expression u/y flags",
            ModuleSyntax => "import/export declarations",
            ExponentOperator => "the exponent operator",
            AsyncFunction => "async functions",
            TrailingComma => "trailing commas in argument and parameter lists",
            ObjectRestSpread => "object rest/spread",
            AsyncIteration => "async iteration",
            RegExpDotAll => "regular expression s flag",
            RegExpNamedGroups => "regular expression named groups",
            RegExpLookbehind => "regular expression lookbehind",
            OptionalCatchBinding => "optional catch binding",
            OptionalChaining => "optional chaining",
            NullishCoalescing => "nullish coalescing",
            BigInt => "BigInt literals",
            DynamicImport => "dynamic import()",
            ImportMeta => "import.meta",
            LogicalAssignment => "logical assignment operators",
            NumericSeparator => "numeric separators",
            ClassFields => "class fields",
            PrivateName => "private names",
            ClassStaticBlock => "class static blocks",
            PrivateIn => "private brand checks",
            RegExpIndices => "regular expression d flag",
            Hashbang => "hashbang comments",
            RegExpUnicodeSets => "regular expression v flag",
            UsingDeclaration => "using declarations",
        }
    }
}

impl fmt::Display for SyntaxFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.introduced_in() {
            Some(version) => write!(f, "{} ({})", self.description(), version),
            None => write!(f, "{} (not yet standard)", self.description()),
        }
    }
}

/// Why a script was rejected by the grammar oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxFailure {
    pub message: String,
    /// Set when the script parsed but used a construct newer than the target
    pub feature: Option<SyntaxFeature>,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl SyntaxFailure {
    /// Failure reported by the parser itself
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            feature: None,
            line: None,
            column: None,
        }
    }

    /// Failure caused by a feature newer than `target`
    pub fn unsupported_feature(feature: SyntaxFeature, target: EcmaVersion, line: usize, column: usize) -> Self {
        Self {
            message: format!("{} not allowed in {}", feature, target),
            feature: Some(feature),
            line: Some(line),
            column: Some(column),
        }
    }
}

impl fmt::Display for SyntaxFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{} at {}:{}", self.message, line, column),
            (Some(line), None) => write!(f, "{} at line {}", self.message, line),
            _ => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!("es5".parse::<EcmaVersion>().unwrap(), EcmaVersion::Es5);
        assert_eq!("ES6".parse::<EcmaVersion>().unwrap(), EcmaVersion::Es2015);
        assert_eq!("es2017".parse::<EcmaVersion>().unwrap(), EcmaVersion::Es2017);
        assert_eq!("2020".parse::<EcmaVersion>().unwrap(), EcmaVersion::Es2020);
        assert!("es3".parse::<EcmaVersion>().is_err());
        assert!("latest".parse::<EcmaVersion>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for version in EcmaVersion::ALL {
            assert_eq!(version.to_string().parse::<EcmaVersion>().unwrap(), version);
        }
        assert_eq!(EcmaVersion::Es5.to_string(), "ES5");
        assert_eq!(EcmaVersion::Es2019.to_string(), "ES2019");
    }

    #[test]
    fn test_versions_are_ordered() {
        assert!(EcmaVersion::Es5 < EcmaVersion::Es2015);
        assert!(EcmaVersion::Es2023 < EcmaVersion::Es2024);
    }

    #[test]
    fn test_feature_allowed_in() {
        assert!(!SyntaxFeature::ArrowFunction.allowed_in(EcmaVersion::Es5));
        assert!(SyntaxFeature::ArrowFunction.allowed_in(EcmaVersion::Es2015));
        assert!(!SyntaxFeature::AsyncFunction.allowed_in(EcmaVersion::Es2016));
        assert!(SyntaxFeature::AsyncFunction.allowed_in(EcmaVersion::Es2017));
        assert!(!SyntaxFeature::UsingDeclaration.allowed_in(EcmaVersion::Es2024));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&EcmaVersion::Es2015).unwrap(), "\"es2015\"");
        assert_eq!(serde_json::from_str::<EcmaVersion>("\"es6\"").unwrap(), EcmaVersion::Es2015);
        assert_eq!(serde_json::to_string(&SyntaxFeature::LetConst).unwrap(), "\"let_const\"");
    }

    #[test]
    fn test_failure_display() {
        let failure = SyntaxFailure::unsupported_feature(SyntaxFeature::ArrowFunction, EcmaVersion::Es5, 3, 9);
        assert_eq!(failure.to_string(), "arrow functions (ES2015) not allowed in ES5 at 3:9");

        let failure = SyntaxFailure::parse_error("Unexpected token");
        assert_eq!(failure.to_string(), "Unexpected token");
    }
}
