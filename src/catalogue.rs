//! The fixed catalogue of detectable features and their browser support.
//!
//! Every feature key the classifier can emit is described here exactly once.
//! The table is never mutated; [`lookup`] goes through an index that is built
//! the first time it is needed and shared by every analysis afterwards.

use std::{borrow::Cow, collections::HashMap, fmt, sync::LazyLock};

use serde::Serialize;

/// Marks a version slot whose support is partial or behind a flag.
pub const PARTIAL_MARKER: char = '*';
/// Slot value for an engine that never shipped the feature.
pub const UNSUPPORTED: &str = "No";

/// The five engines a [`VersionRecord`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    InternetExplorer,
}
impl Browser {
    pub const ALL: [Browser; 5] = [
        Browser::Chrome,
        Browser::Firefox,
        Browser::Safari,
        Browser::Edge,
        Browser::InternetExplorer,
    ];
    /// The engine the "legacy compatible" summary flag is decided by.
    pub const LEGACY: Browser = Browser::InternetExplorer;
    pub fn name(self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
            Browser::Safari => "safari",
            Browser::Edge => "edge",
            Browser::InternetExplorer => "ie",
        }
    }
}
impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-engine support floors, e.g. `"45+"`, `"11*"` or `"No"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VersionRecord {
    pub chrome: Cow<'static, str>,
    pub firefox: Cow<'static, str>,
    pub safari: Cow<'static, str>,
    pub edge: Cow<'static, str>,
    pub ie: Cow<'static, str>,
}
impl VersionRecord {
    pub const fn new(
        chrome: &'static str,
        firefox: &'static str,
        safari: &'static str,
        edge: &'static str,
        ie: &'static str,
    ) -> Self {
        Self {
            chrome: Cow::Borrowed(chrome),
            firefox: Cow::Borrowed(firefox),
            safari: Cow::Borrowed(safari),
            edge: Cow::Borrowed(edge),
            ie: Cow::Borrowed(ie),
        }
    }
    /// Builds a record by asking `f` for every slot in [`Browser::ALL`] order.
    pub fn from_fn(mut f: impl FnMut(Browser) -> Cow<'static, str>) -> Self {
        Self {
            chrome: f(Browser::Chrome),
            firefox: f(Browser::Firefox),
            safari: f(Browser::Safari),
            edge: f(Browser::Edge),
            ie: f(Browser::InternetExplorer),
        }
    }
    pub fn get(&self, browser: Browser) -> &str {
        match browser {
            Browser::Chrome => &self.chrome,
            Browser::Firefox => &self.firefox,
            Browser::Safari => &self.safari,
            Browser::Edge => &self.edge,
            Browser::InternetExplorer => &self.ie,
        }
    }
    pub fn legacy(&self) -> &str {
        self.get(Browser::LEGACY)
    }
}

/// Whether a slot value says the engine never shipped the feature.
pub fn is_unsupported(slot: &str) -> bool {
    slot == UNSUPPORTED
}
/// Whether a slot value carries the [`PARTIAL_MARKER`].
pub fn is_partial(slot: &str) -> bool {
    slot.contains(PARTIAL_MARKER)
}
/// The numeric floor of a slot: everything except digits and periods is
/// stripped and the rest parsed. `"No"` and garbage give `None`.
pub fn version_floor(slot: &str) -> Option<f64> {
    if is_unsupported(slot) {
        return None;
    }
    let digits: String = slot
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDescriptor {
    pub key: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub support: VersionRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'static str>,
}

static INDEX: LazyLock<HashMap<&'static str, &'static FeatureDescriptor>> =
    LazyLock::new(|| FEATURES.iter().map(|f| (f.key, f)).collect());

/// Finds the descriptor for `key`. Unknown keys are not an error.
pub fn lookup(key: &str) -> Option<&'static FeatureDescriptor> {
    INDEX.get(key).copied()
}
pub fn all() -> &'static [FeatureDescriptor] {
    FEATURES
}

const fn feature(
    key: &'static str,
    display_name: &'static str,
    description: &'static str,
    support: VersionRecord,
    notes: Option<&'static str>,
) -> FeatureDescriptor {
    FeatureDescriptor {
        key,
        display_name,
        description,
        support,
        notes,
    }
}
use VersionRecord as V;

static FEATURES: &[FeatureDescriptor] = &[
    // Functions
    feature(
        "arrow-functions",
        "Arrow functions",
        "Concise function expressions with lexical this: (a) => a * 2",
        V::new("45+", "22+", "10+", "12+", "No"),
        None,
    ),
    feature(
        "default-parameters",
        "Default parameters",
        "Parameters initialized with a default value when undefined is passed",
        V::new("49+", "15+", "10+", "14+", "No"),
        None,
    ),
    feature(
        "rest-parameters",
        "Rest parameters",
        "Collects remaining arguments into an array: function f(...args)",
        V::new("47+", "15+", "10+", "12+", "No"),
        None,
    ),
    feature(
        "generators",
        "Generator functions",
        "function* declarations and generator methods that can yield",
        V::new("39+", "26+", "10+", "13+", "No"),
        None,
    ),
    feature(
        "async-functions",
        "Async functions",
        "async function declarations, expressions, methods and arrows",
        V::new("55+", "52+", "10.1+", "15+", "No"),
        None,
    ),
    feature(
        "await",
        "await expressions",
        "Suspends an async function until a promise settles",
        V::new("55+", "52+", "10.1+", "15+", "No"),
        None,
    ),
    feature(
        "async-generators",
        "Async generators",
        "async function* producing an async iterator",
        V::new("63+", "55+", "12+", "79+", "No"),
        None,
    ),
    feature(
        "for-await-of",
        "for await...of",
        "Iterates over async iterables",
        V::new("63+", "57+", "11.1+", "79+", "No"),
        None,
    ),
    feature(
        "top-level-await",
        "Top-level await",
        "await used at module top level outside any function",
        V::new("89+", "89+", "15+", "89+", "No"),
        Some("Only valid in ES modules."),
    ),
    feature(
        "new-target",
        "new.target",
        "Detects whether a function was called with new",
        V::new("46+", "41+", "10+", "13+", "No"),
        None,
    ),
    // Declarations
    feature(
        "let",
        "let declarations",
        "Block-scoped mutable variable declarations",
        V::new("49+", "44+", "10+", "14+", "11*"),
        Some("Internet Explorer 11 lacks per-iteration bindings in for loops."),
    ),
    feature(
        "const",
        "const declarations",
        "Block-scoped constant declarations",
        V::new("49+", "36+", "10+", "14+", "11*"),
        Some("Internet Explorer 11 lacks per-iteration bindings in for loops."),
    ),
    feature(
        "explicit-resource-management",
        "using declarations",
        "using and await using declarations that dispose resources at scope exit",
        V::new("134+", "141+", "No", "134+", "No"),
        None,
    ),
    feature(
        "destructuring",
        "Destructuring assignment",
        "Unpacks values from arrays or properties from objects into bindings",
        V::new("49+", "41+", "8+", "14+", "No"),
        None,
    ),
    // Classes
    feature(
        "classes",
        "Classes",
        "class declarations and expressions",
        V::new("49+", "45+", "9+", "13+", "No"),
        None,
    ),
    feature(
        "class-fields",
        "Public class fields",
        "Instance properties declared in the class body",
        V::new("72+", "69+", "14+", "79+", "No"),
        None,
    ),
    feature(
        "static-class-fields",
        "Static class fields",
        "static properties declared in the class body",
        V::new("72+", "75+", "14.1+", "79+", "No"),
        None,
    ),
    feature(
        "private-class-fields",
        "Private class fields",
        "#private properties only reachable inside the class",
        V::new("74+", "90+", "14.1+", "79+", "No"),
        None,
    ),
    feature(
        "private-methods",
        "Private methods",
        "#private methods and accessors",
        V::new("84+", "90+", "15+", "84+", "No"),
        None,
    ),
    feature(
        "class-static-blocks",
        "Class static initialization blocks",
        "static { ... } blocks run once when the class is evaluated",
        V::new("94+", "93+", "16.4+", "94+", "No"),
        None,
    ),
    feature(
        "private-in",
        "Private brand checks",
        "#field in obj tests whether an object has a private member",
        V::new("91+", "90+", "15+", "91+", "No"),
        None,
    ),
    feature(
        "decorators",
        "Decorators",
        "@decorator syntax on classes and class members",
        V::new("No", "No", "No", "No", "No"),
        Some("Stage 3 proposal; requires a transpiler."),
    ),
    // Literals and operators
    feature(
        "template-literals",
        "Template literals",
        "Backtick strings with ${} interpolation",
        V::new("41+", "34+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "tagged-templates",
        "Tagged templates",
        "Template literals processed by a tag function: tag`text`",
        V::new("41+", "34+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "string-raw",
        "String.raw",
        "Raw template string tag",
        V::new("41+", "34+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "spread-syntax",
        "Spread syntax",
        "Expands iterables into array literals and call arguments",
        V::new("46+", "16+", "8+", "12+", "No"),
        None,
    ),
    feature(
        "object-rest-spread",
        "Object rest/spread properties",
        "{ ...obj } in object literals and rest properties in object patterns",
        V::new("60+", "55+", "11.1+", "79+", "No"),
        None,
    ),
    feature(
        "shorthand-properties",
        "Shorthand property names",
        "{ a } as shorthand for { a: a }",
        V::new("43+", "33+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "computed-properties",
        "Computed property names",
        "{ [expr]: value } in object literals, classes and patterns",
        V::new("47+", "34+", "8+", "12+", "No"),
        None,
    ),
    feature(
        "method-definitions",
        "Method definitions",
        "Shorthand method syntax in object literals: { m() {} }",
        V::new("39+", "34+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "exponentiation",
        "Exponentiation operator",
        "a ** b and a **= b",
        V::new("52+", "52+", "10.1+", "14+", "No"),
        None,
    ),
    feature(
        "optional-chaining",
        "Optional chaining",
        "a?.b, a?.[b] and a?.() short-circuit on null or undefined",
        V::new("80+", "74+", "13.1+", "80+", "No"),
        None,
    ),
    feature(
        "nullish-coalescing",
        "Nullish coalescing",
        "a ?? b falls back only on null or undefined",
        V::new("80+", "72+", "13.1+", "80+", "No"),
        None,
    ),
    feature(
        "logical-assignment",
        "Logical assignment",
        "&&=, ||= and ??= operators",
        V::new("85+", "79+", "14+", "85+", "No"),
        None,
    ),
    feature(
        "numeric-separators",
        "Numeric separators",
        "Underscores between digits: 1_000_000",
        V::new("75+", "70+", "13+", "79+", "No"),
        None,
    ),
    feature(
        "binary-octal-literals",
        "Binary and octal literals",
        "0b1010 and 0o755 number literals",
        V::new("41+", "25+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "unicode-code-point-escapes",
        "Unicode code point escapes",
        "\\u{1F600} escapes in string literals",
        V::new("44+", "40+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "bigint",
        "BigInt",
        "Arbitrary precision integers: 10n and BigInt()",
        V::new("67+", "68+", "14+", "79+", "No"),
        None,
    ),
    // Control flow
    feature(
        "for-of",
        "for...of loops",
        "Iterates over iterable objects",
        V::new("38+", "13+", "7+", "12+", "No"),
        None,
    ),
    feature(
        "optional-catch-binding",
        "Optional catch binding",
        "try { } catch { } without an error binding",
        V::new("66+", "58+", "11.1+", "79+", "No"),
        None,
    ),
    // Modules
    feature(
        "es-modules",
        "ES modules",
        "Static import and export declarations",
        V::new("61+", "60+", "10.1+", "16+", "No"),
        None,
    ),
    feature(
        "dynamic-import",
        "Dynamic import",
        "import() loading a module on demand",
        V::new("63+", "67+", "11.1+", "79+", "No"),
        None,
    ),
    feature(
        "import-meta",
        "import.meta",
        "Module metadata such as import.meta.url",
        V::new("64+", "62+", "11.1+", "79+", "No"),
        None,
    ),
    feature(
        "hashbang",
        "Hashbang comment",
        "#! interpreter line at the very start of the source",
        V::new("74+", "67+", "13.1+", "79+", "No"),
        None,
    ),
    // Regular expressions
    feature(
        "regex-dotall",
        "RegExp dotAll flag",
        "The s flag makes . match line terminators",
        V::new("62+", "78+", "11.1+", "79+", "No"),
        None,
    ),
    feature(
        "regex-sticky",
        "RegExp sticky flag",
        "The y flag matches only at lastIndex",
        V::new("49+", "3+", "10+", "13+", "No"),
        None,
    ),
    feature(
        "regex-unicode",
        "RegExp unicode flag",
        "The u flag enables full Unicode matching",
        V::new("50+", "46+", "10+", "12+", "No"),
        None,
    ),
    feature(
        "regex-match-indices",
        "RegExp match indices",
        "The d flag records start and end indices of captures",
        V::new("90+", "88+", "15+", "90+", "No"),
        None,
    ),
    feature(
        "regex-unicode-sets",
        "RegExp unicodeSets flag",
        "The v flag enables set notation and string properties",
        V::new("112+", "116+", "17+", "112+", "No"),
        None,
    ),
    feature(
        "regex-named-groups",
        "RegExp named capture groups",
        "(?<name>...) groups readable through match.groups",
        V::new("64+", "78+", "11.1+", "79+", "No"),
        None,
    ),
    feature(
        "regex-lookbehind",
        "RegExp lookbehind assertions",
        "(?<=...) and (?<!...) assertions",
        V::new("62+", "78+", "16.4+", "79+", "No"),
        None,
    ),
    feature(
        "regex-unicode-property-escapes",
        "RegExp Unicode property escapes",
        "\\p{...} and \\P{...} character classes",
        V::new("64+", "78+", "11.1+", "79+", "No"),
        None,
    ),
    // Built-in objects
    feature(
        "promises",
        "Promises",
        "The Promise constructor and its combinators",
        V::new("32+", "29+", "8+", "12+", "No"),
        None,
    ),
    feature(
        "map",
        "Map",
        "Keyed collection with insertion order",
        V::new("38+", "13+", "8+", "12+", "11*"),
        Some("Internet Explorer 11 ignores the iterable constructor argument."),
    ),
    feature(
        "set",
        "Set",
        "Collection of unique values",
        V::new("38+", "13+", "8+", "12+", "11*"),
        Some("Internet Explorer 11 ignores the iterable constructor argument."),
    ),
    feature(
        "weakmap",
        "WeakMap",
        "Map with weakly held object keys",
        V::new("36+", "6+", "8+", "12+", "11*"),
        Some("Internet Explorer 11 ignores the iterable constructor argument."),
    ),
    feature(
        "weakset",
        "WeakSet",
        "Set of weakly held objects",
        V::new("36+", "34+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "proxy",
        "Proxy",
        "Intercepts fundamental operations on an object",
        V::new("49+", "18+", "10+", "12+", "No"),
        None,
    ),
    feature(
        "reflect",
        "Reflect",
        "Namespace of interceptable object operations",
        V::new("49+", "42+", "10+", "12+", "No"),
        None,
    ),
    feature(
        "symbol",
        "Symbol",
        "Unique primitive values and well-known symbols",
        V::new("38+", "36+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "weakref",
        "WeakRef",
        "Weak references to objects",
        V::new("84+", "79+", "14.1+", "84+", "No"),
        None,
    ),
    feature(
        "finalization-registry",
        "FinalizationRegistry",
        "Callbacks after objects are garbage collected",
        V::new("84+", "79+", "14.1+", "84+", "No"),
        None,
    ),
    feature(
        "aggregate-error",
        "AggregateError",
        "An error wrapping several errors",
        V::new("85+", "79+", "14+", "85+", "No"),
        None,
    ),
    feature(
        "shared-array-buffer",
        "SharedArrayBuffer",
        "Memory shared between workers",
        V::new("68+", "79+", "15.2+", "79+", "No"),
        Some("Requires cross-origin isolation in browsers."),
    ),
    feature(
        "typed-arrays",
        "Typed arrays",
        "ArrayBuffer, DataView and the typed array views",
        V::new("7+", "4+", "5.1+", "12+", "10+"),
        None,
    ),
    feature(
        "error-cause",
        "Error cause",
        "new Error(message, { cause }) chains errors",
        V::new("93+", "91+", "15+", "93+", "No"),
        Some("Reported for any error constructed with an object literal options argument."),
    ),
    feature(
        "globalthis",
        "globalThis",
        "Standard reference to the global object",
        V::new("71+", "65+", "12.1+", "79+", "No"),
        None,
    ),
    feature(
        "structured-clone",
        "structuredClone",
        "Deep copies values using the structured clone algorithm",
        V::new("98+", "94+", "15.4+", "98+", "No"),
        None,
    ),
    // Static methods
    feature(
        "object-assign",
        "Object.assign",
        "Copies own enumerable properties onto a target",
        V::new("45+", "34+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "object-entries-values",
        "Object.entries / Object.values",
        "Arrays of an object's own enumerable values or entries",
        V::new("54+", "47+", "10.1+", "14+", "No"),
        None,
    ),
    feature(
        "object-from-entries",
        "Object.fromEntries",
        "Builds an object from key/value pairs",
        V::new("73+", "63+", "12.1+", "79+", "No"),
        None,
    ),
    feature(
        "object-get-own-property-descriptors",
        "Object.getOwnPropertyDescriptors",
        "All own property descriptors of an object",
        V::new("54+", "50+", "10+", "15+", "No"),
        None,
    ),
    feature(
        "object-has-own",
        "Object.hasOwn",
        "Checks for an own property without hasOwnProperty",
        V::new("93+", "92+", "15.4+", "93+", "No"),
        None,
    ),
    feature(
        "array-grouping",
        "Object.groupBy / Map.groupBy",
        "Groups iterable items by a callback result",
        V::new("117+", "119+", "17.4+", "117+", "No"),
        None,
    ),
    feature(
        "array-from",
        "Array.from",
        "Creates an array from an iterable or array-like",
        V::new("45+", "32+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "array-of",
        "Array.of",
        "Creates an array from its arguments",
        V::new("45+", "25+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "array-from-async",
        "Array.fromAsync",
        "Creates an array from an async iterable",
        V::new("121+", "115+", "16.4+", "121+", "No"),
        None,
    ),
    feature(
        "promise-all-settled",
        "Promise.allSettled",
        "Waits for every promise to settle",
        V::new("76+", "71+", "13+", "79+", "No"),
        None,
    ),
    feature(
        "promise-any",
        "Promise.any",
        "Resolves with the first fulfilled promise",
        V::new("85+", "79+", "14+", "85+", "No"),
        None,
    ),
    feature(
        "promise-with-resolvers",
        "Promise.withResolvers",
        "A promise together with its resolve and reject functions",
        V::new("119+", "121+", "17.4+", "119+", "No"),
        None,
    ),
    feature(
        "promise-finally",
        "Promise.prototype.finally",
        "Runs a callback when a promise settles either way",
        V::new("63+", "58+", "11.1+", "18+", "No"),
        None,
    ),
    feature(
        "number-methods",
        "ES2015 Number methods",
        "Number.isInteger, Number.isSafeInteger, Number.isNaN and friends",
        V::new("34+", "16+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "math-methods",
        "ES2015 Math methods",
        "Math.trunc, Math.sign, Math.hypot and friends",
        V::new("38+", "25+", "8+", "12+", "No"),
        None,
    ),
    // Instance methods
    feature(
        "array-includes",
        "Array.prototype.includes",
        "Tests whether an array contains a value",
        V::new("47+", "43+", "9+", "14+", "No"),
        Some("Reported for every .includes() call because the receiver type is unknown."),
    ),
    feature(
        "string-includes",
        "String.prototype.includes",
        "Tests whether a string contains a substring",
        V::new("41+", "40+", "9+", "12+", "No"),
        Some("Reported for every .includes() call because the receiver type is unknown."),
    ),
    feature(
        "array-at",
        "Array.prototype.at",
        "Relative indexing with negative offsets",
        V::new("92+", "90+", "15.4+", "92+", "No"),
        Some("Reported for every .at() call because the receiver type is unknown."),
    ),
    feature(
        "string-at",
        "String.prototype.at",
        "Relative character indexing with negative offsets",
        V::new("92+", "90+", "15.4+", "92+", "No"),
        Some("Reported for every .at() call because the receiver type is unknown."),
    ),
    feature(
        "typed-array-at",
        "TypedArray.prototype.at",
        "Relative indexing on typed arrays",
        V::new("92+", "90+", "15.4+", "92+", "No"),
        Some("Reported for every .at() call because the receiver type is unknown."),
    ),
    feature(
        "array-with",
        "Array.prototype.with",
        "Copy of an array with one element replaced",
        V::new("110+", "115+", "16+", "110+", "No"),
        Some("Reported for every .with() call because the receiver type is unknown."),
    ),
    feature(
        "typed-array-with",
        "TypedArray.prototype.with",
        "Copy of a typed array with one element replaced",
        V::new("110+", "115+", "16+", "110+", "No"),
        Some("Reported for every .with() call because the receiver type is unknown."),
    ),
    feature(
        "array-flat",
        "Array.prototype.flat / flatMap",
        "Flattens nested arrays",
        V::new("69+", "62+", "12+", "79+", "No"),
        None,
    ),
    feature(
        "array-find-last",
        "Array.prototype.findLast / findLastIndex",
        "Searches an array from the end",
        V::new("97+", "104+", "15.4+", "97+", "No"),
        None,
    ),
    feature(
        "array-change-by-copy",
        "Change array by copy",
        "toSorted, toReversed and toSpliced return new arrays",
        V::new("110+", "115+", "16+", "110+", "No"),
        None,
    ),
    feature(
        "array-find",
        "Array.prototype.find / findIndex",
        "First element or index matching a predicate",
        V::new("45+", "25+", "7.1+", "12+", "No"),
        None,
    ),
    feature(
        "array-fill",
        "Array.prototype.fill",
        "Fills a range of an array with a value",
        V::new("45+", "31+", "7.1+", "12+", "No"),
        None,
    ),
    feature(
        "string-padding",
        "String.prototype.padStart / padEnd",
        "Pads a string to a target length",
        V::new("57+", "48+", "10+", "15+", "No"),
        None,
    ),
    feature(
        "string-trim-start-end",
        "String.prototype.trimStart / trimEnd",
        "Removes whitespace from one end of a string",
        V::new("66+", "61+", "12+", "79+", "No"),
        None,
    ),
    feature(
        "string-replace-all",
        "String.prototype.replaceAll",
        "Replaces every occurrence of a pattern",
        V::new("85+", "77+", "13.1+", "85+", "No"),
        None,
    ),
    feature(
        "string-match-all",
        "String.prototype.matchAll",
        "Iterator over all regular expression matches",
        V::new("73+", "67+", "13+", "79+", "No"),
        None,
    ),
    feature(
        "string-starts-ends-with",
        "String.prototype.startsWith / endsWith",
        "Tests a string prefix or suffix",
        V::new("41+", "17+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "string-repeat",
        "String.prototype.repeat",
        "Concatenates copies of a string",
        V::new("41+", "24+", "9+", "12+", "No"),
        None,
    ),
    feature(
        "string-well-formed",
        "String.prototype.isWellFormed / toWellFormed",
        "Detects and replaces lone surrogates",
        V::new("111+", "119+", "16.4+", "111+", "No"),
        None,
    ),
    feature(
        "set-methods",
        "Set methods",
        "union, intersection, difference and related Set operations",
        V::new("122+", "127+", "17+", "122+", "No"),
        None,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn keys_are_unique() {
        let keys: BTreeSet<_> = all().iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), all().len());
    }

    #[test]
    fn every_slot_is_well_formed() {
        for f in all() {
            for b in Browser::ALL {
                let slot = f.support.get(b);
                assert!(
                    is_unsupported(slot) || version_floor(slot).is_some(),
                    "{}: bad {b} slot {slot:?}",
                    f.key
                );
            }
        }
    }

    #[test]
    fn lookup_unknown_is_none() {
        assert!(lookup("not-a-feature").is_none());
        assert_eq!(lookup("const").map(|f| f.display_name), Some("const declarations"));
    }

    #[test]
    fn floors() {
        assert_eq!(version_floor("45+"), Some(45.0));
        assert_eq!(version_floor("14.1+"), Some(14.1));
        assert_eq!(version_floor("11*"), Some(11.0));
        assert_eq!(version_floor("No"), None);
        assert_eq!(version_floor("?"), None);
        assert!(is_partial("11*"));
        assert!(!is_partial("11+"));
    }
}
