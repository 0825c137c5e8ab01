// Built-in pattern table.
//
// Exclusions are grouped by family: identifiers, timestamps/lifecycle,
// counters/history, migration/UI bookkeeping, component/hardware bookkeeping.
// The policy list is annotation only; an exclusion match always wins over it.

use crate::error::Result;
use crate::types::PatternKind;

use super::pattern::Pattern;

pub const DEFAULT_EXCLUDE_EXACT: &[&str] = &[
    // per-profile extension UUID map, never pin
    "extensions.webextensions.uuids",
    "toolkit.telemetry.cachedClientID",
    "toolkit.telemetry.previousBuildID",
    // purge / startup checks
    "privacy.purge_trackers.date_in_cookie_database",
    "privacy.sanitize.pending",
    "browser.startup.lastColdStartupCheck",
    "browser.startup.couldRestoreSession.count",
    "browser.laterrun.bookkeeping.profileCreationTime",
    "browser.laterrun.bookkeeping.sessionCount",
    // search totals
    "browser.search.totalSearches",
    // last-seen milestone, rewritten on every upgrade
    "browser.startup.homepage_override.mstone",
    // UI state blobs
    "browser.pageActions.persistedActions",
    "browser.uiCustomization.state",
    "browser.urlbar.resultGroups",
    "extensions.quarantinedDomains.list",
    "security.sandbox.content.tempDirSuffix",
    "print_printer",
];

pub const DEFAULT_EXCLUDE_PREFIXES: &[&str] = &[
    // session/runtime churn
    "browser.sessionstore.",
    // UI / engagement bookkeeping
    "browser.engagement.",
    "browser.migration.",
    "browser.protections_panel.",
    "browser.termsofuse.",
    "devtools.",
    // remote settings / region / connectivity bookkeeping
    "services.settings.",
    "browser.region.",
    "network.captive-portal-service.",
    "network.connectivity-service.",
    "browser.safebrowsing.provider.",
    // distro/policy bookkeeping
    "browser.policies.",
    "distribution.",
    // extensions churn
    "extensions.getAddons.",
    "extensions.systemAddonSet",
    "extensions.webextensions.uuids",
    "extensions.lastAppBuildId",
    "extensions.lastAppVersion",
    "extensions.lastPlatformVersion",
    "app.update.lastUpdateTime.",
    // telemetry/reporting caches
    "toolkit.telemetry.cached",
    "datareporting.dau.cached",
    // experiments/rollouts and push identifiers
    "nimbus.",
    "dom.push.",
    // components and hardware
    "media.gmp-",
    "gfx.blacklist.",
    "print.printer_",
    "print.printer.",
    // font fingerprinting surface
    "font.",
];

pub const DEFAULT_EXCLUDE_SUFFIXES: &[&str] = &[
    // identifiers
    "Id",
    "ID",
    "_id",
    "UUID",
    "Uuid",
    // timestamps
    "_date",
    "Date",
    "_time",
    "Time",
    "_seconds",
    "Seconds",
    "Timestamp",
    "timestamp",
    // counters
    "count",
    "Count",
    "counter",
    "Counter",
    "impressions",
    "Impressions",
    // bookkeeping
    "Schema",
    "schema",
    ".has-used",
    ".seen",
    ".pending",
    ".shown",
    "Applied",
    // stored format/UI versions
    "Version",
    "_version",
    ".version",
];

pub const DEFAULT_EXCLUDE_SUBSTRINGS: &[&str] = &[
    // identifiers / per-profile markers
    "impressionid",
    "storeid",
    "profileid",
    "clientid",
    "userid",
    "pushid",
    "installationid",
    "instanceid",
    "deviceid",
    "machineid",
    "failureid",
    "buildid",
    "guid",
    "uuid",
    // time / sync state
    "timestamp",
    "etag",
    "skew",
    // migration/UX bookkeeping
    "migrat",
    "checkpoint",
    "has-used",
    ".ever",
    "mostrecent",
    // known state blobs
    "persistedactions",
    "uicustomization",
    "resultgroups",
    "quarantineddomains",
    "tempdirsuffix",
    "blacklist.",
    "hashvalue",
];

pub const DEFAULT_EXCLUDE_REGEXES: &[&str] = &[
    // a dotted/underscored segment starting with last* or next*
    r"(?:^|[._-])(?:last|next)(?:[A-Z_.-]|$)",
    // seen*/didSee*/pending* segments followed by a camel-case word
    r"(?:^|[._])(?:seen|didSee|pending)[A-Z]",
    // storage format versions mid-name; a bare `.version.` would catch security.tls.version.*
    r"\.storage\.version\.",
    // names embedding a {GUID}
    r"\{[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}\}",
];

pub const DEFAULT_POLICY_EXACT: &[&str] = &[
    "media.eme.enabled",
    "browser.bookmarks.autoExportHTML",
    "browser.bookmarks.file",
    "beacon.enabled",
    "privacy.globalprivacycontrol.enabled",
    "privacy.globalprivacycontrol.pbmode",
    "privacy.resistFingerprinting",
    "privacy.firstparty.isolate",
    "dom.forms.autocomplete.formautofill",
    "toolkit.telemetry.enabled",
    "toolkit.telemetry.unified",
    "toolkit.telemetry.server",
    "toolkit.telemetry.archive.enabled",
];

pub const DEFAULT_POLICY_PREFIXES: &[&str] = &[
    "network.trr.",
    "network.dns.",
    "browser.contentblocking.",
    "privacy.trackingprotection.",
    "privacy.partition.",
    "privacy.query_stripping.",
    "privacy.userContext.",
    "toolkit.telemetry.reportingpolicy.",
    "datareporting.healthreport.",
    "datareporting.policy.",
    "security.tls.",
    "security.ssl.",
    "security.ocsp.",
    "dom.security.",
];

pub const DEFAULT_POLICY_REGEXES: &[&str] = &[
    r"^browser\.safebrowsing\.(?:downloads\.remote\.(?:enabled|url)|malware\.enabled|phishing\.enabled)$",
];

/// Build the default table in declaration order: exclusions first, then policy annotations
pub fn default_patterns() -> Result<Vec<Pattern>> {
    let exclusions = [
        (PatternKind::Exact, DEFAULT_EXCLUDE_EXACT),
        (PatternKind::Prefix, DEFAULT_EXCLUDE_PREFIXES),
        (PatternKind::Suffix, DEFAULT_EXCLUDE_SUFFIXES),
        (PatternKind::Contains, DEFAULT_EXCLUDE_SUBSTRINGS),
        (PatternKind::Regex, DEFAULT_EXCLUDE_REGEXES),
    ];
    let policy = [
        (PatternKind::Exact, DEFAULT_POLICY_EXACT),
        (PatternKind::Prefix, DEFAULT_POLICY_PREFIXES),
        (PatternKind::Regex, DEFAULT_POLICY_REGEXES),
    ];

    let mut patterns = Vec::new();
    for (kind, texts) in exclusions {
        for text in texts {
            patterns.push(Pattern::excluded(kind, text)?);
        }
    }
    for (kind, texts) in policy {
        for text in texts {
            patterns.push(Pattern::policy(kind, text)?);
        }
    }
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_compiles() {
        let patterns = default_patterns().unwrap();
        let expected = DEFAULT_EXCLUDE_EXACT.len()
            + DEFAULT_EXCLUDE_PREFIXES.len()
            + DEFAULT_EXCLUDE_SUFFIXES.len()
            + DEFAULT_EXCLUDE_SUBSTRINGS.len()
            + DEFAULT_EXCLUDE_REGEXES.len()
            + DEFAULT_POLICY_EXACT.len()
            + DEFAULT_POLICY_PREFIXES.len()
            + DEFAULT_POLICY_REGEXES.len();
        assert_eq!(patterns.len(), expected);
    }

    #[test]
    fn test_substrings_are_lowercase() {
        // Contains matching lowercases the name, so upper-case text could never match
        for text in DEFAULT_EXCLUDE_SUBSTRINGS {
            assert_eq!(*text, text.to_ascii_lowercase());
        }
    }
}
