//! Identifiers that exist without a declaration in the script runtime.

use std::collections::HashSet;

/// Built-ins of the ECMAScript 3 global object.
const LANGUAGE_GLOBALS: &[&str] = &[
    "Array",
    "Boolean",
    "Date",
    "Error",
    "EvalError",
    "Function",
    "Infinity",
    "Math",
    "NaN",
    "Number",
    "Object",
    "RangeError",
    "ReferenceError",
    "RegExp",
    "String",
    "SyntaxError",
    "TypeError",
    "URIError",
    "arguments",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "escape",
    "eval",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
    "unescape",
];

/// Objects and functions the marketing-cloud script runtime injects.
const PLATFORM_GLOBALS: &[&str] = &[
    "Account",
    "AccountUser",
    "Attribute",
    "Base64Decode",
    "Base64Encode",
    "BounceEvent",
    "ClickEvent",
    "ContentArea",
    "ContentAreaObj",
    "ContentBlockByID",
    "ContentBlockByKey",
    "ContentBlockByName",
    "DataExtension",
    "DateTime",
    "DeliveryProfile",
    "Email",
    "Folder",
    "FilterDefinition",
    "Format",
    "GUID",
    "HTTP",
    "HTTPHeader",
    "List",
    "Now",
    "OpenEvent",
    "Platform",
    "Portfolio",
    "QueryDefinition",
    "Redirect",
    "Request",
    "Script",
    "Send",
    "SendClassification",
    "SenderProfile",
    "Stringify",
    "Subscriber",
    "Template",
    "TriggeredSend",
    "UnsubEvent",
    "Variable",
    "WSProxy",
    "Write",
];

/// The set of identifiers treated as declared by the runtime.
#[derive(Debug, Clone)]
pub struct KnownGlobals {
    names: HashSet<String>,
}

impl KnownGlobals {
    /// Creates the built-in set extended with `extra` names.
    #[must_use]
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: HashSet<String> = LANGUAGE_GLOBALS
            .iter()
            .chain(PLATFORM_GLOBALS)
            .map(|name| (*name).to_owned())
            .collect();
        names.extend(extra.into_iter().map(Into::into));
        Self { names }
    }

    /// Returns `true` when `name` is provided by the runtime.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Default for KnownGlobals {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<String>())
    }
}
