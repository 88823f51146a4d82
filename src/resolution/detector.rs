//! Three-round DNS stability confirmation.
//!
//! A single differing answer cannot distinguish "the upstream failed over
//! once" from "the upstream rotates addresses continuously". The protocol
//! requires two consecutive identical answers before declaring genuine
//! staleness, and two consecutive answer changes before declaring rotation,
//! at the cost of at most two extra lookups per check.

use std::collections::BTreeSet;
use std::net::IpAddr;

use crate::error::CheckFailure;
use crate::resolution::flag::FlagStore;
use crate::resolution::resolver::Resolve;

/// Verify that `name` still resolves to every address the workers dial.
///
/// No-op pass once the load-balancing flag is set. On confirmed rotation
/// the flag is persisted and the check succeeds immediately; a single
/// answer flip is treated as noise for this round.
pub async fn check_resolution_stability<R, F>(
    resolver: &R,
    flag: &F,
    name: &str,
    pre_resolved: &BTreeSet<IpAddr>,
) -> Result<(), CheckFailure>
where
    R: Resolve,
    F: FlagStore,
{
    if flag.is_set() {
        tracing::debug!(
            target_name = name,
            "load-balancing DNS previously confirmed, skipping resolution check"
        );
        return Ok(());
    }

    for address in pre_resolved {
        tracing::info!(target_name = name, %address, "checking that the target still resolves to the worker address");

        let first = resolver.resolve(name).await?;
        if first.contains(address) {
            continue;
        }

        let second = resolver.resolve(name).await?;
        if second == first {
            // Stable answer that excludes our address: the upstream moved
            // and the worker dials a dead end.
            return Err(CheckFailure::StaleResolution {
                name: name.to_string(),
                address: *address,
                first,
                second,
            });
        }

        let third = resolver.resolve(name).await?;
        if third != second {
            tracing::info!(
                target_name = name,
                first = ?first,
                second = ?second,
                third = ?third,
                "answers keep changing, looks like load-balancing DNS; disabling the resolution check"
            );
            flag.set(name)?;
            return Ok(());
        }

        // One coincidental flip: not enough evidence to fail or to disable
        // the check permanently.
        tracing::debug!(target_name = name, %address, "single answer change, treating as transient");
    }

    Ok(())
}
