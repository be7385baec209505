//! Implementation of the `patchstat reconstruct` command.

use crate::cli::ReconstructArgs;
use crate::error::{PatchstatError, Result};
use crate::reconstruct::{check_round_trip, reconstruct};

/// Execute the `patchstat reconstruct` command.
///
/// Prints the reconstructed patch. With `--check`, a reconstruction that
/// differs from the input is a verification failure and nothing is printed.
pub fn cmd_reconstruct(args: ReconstructArgs) -> Result<String> {
    let (text, patch) = super::load_patch(&args.input)?;

    if args.check
        && let Some(mismatch) = check_round_trip(&patch, &text)
    {
        return Err(PatchstatError::VerificationFailed(format!(
            "reconstruction differs from input: {}",
            mismatch
        )));
    }

    Ok(reconstruct(&patch))
}
