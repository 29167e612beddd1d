//! Dataset-rebuild job generation
//!
//! This module generates the IDCAMS batch job that rebuilds the keyed
//! dataset from a record set: delete the old cluster, define a fresh one,
//! repopulate it from inline data and list the catalog entry as
//! verification. The step keywords and their ordering are a wire contract
//! with the mainframe-side interpreter and must be reproduced exactly.
//!
//! The dataset has a hard capacity of [`MAX_RECORDS`] records. Over-capacity
//! record sets are windowed deterministically: the balance pair survives
//! unconditionally, the control record is never dropped, and the oldest
//! transaction records are the ones sacrificed.

use crate::types::DatasetRecord;

/// Hard capacity of the target dataset, in records
///
/// The define-cluster step allocates space for exactly this many 75-byte
/// records; loading more makes the repopulate step fail.
pub const MAX_RECORDS: usize = 7648;

/// Records reserved at the head of every snapshot for the balance pair
const BALANCE_SLOTS: usize = 2;

/// Builder for the dataset-rebuild job script
///
/// Holds the credentials and dataset identity, upper-cased once at
/// construction: the target environment's identifiers are case-normalized,
/// so `test.vsam` and `TEST.VSAM` name the same dataset.
///
/// # Examples
///
/// ```
/// use doge_vsam_bridge::{encode_control, DatasetScriptBuilder};
///
/// let builder = DatasetScriptBuilder::new("herc01", "cul8tr", "doge.coins", "pub001");
/// let script = builder.build(&[encode_control()], false);
/// assert!(script.contains("DELETE DOGE.COINS"));
/// assert!(script.contains("DEFINE CLUSTER"));
/// ```
#[derive(Debug, Clone)]
pub struct DatasetScriptBuilder {
    user: String,
    password: String,
    dataset: String,
    volume: String,
}

impl DatasetScriptBuilder {
    /// Create a builder for one dataset
    ///
    /// All four identifiers are upper-cased before embedding.
    pub fn new(user: &str, password: &str, dataset: &str, volume: &str) -> Self {
        DatasetScriptBuilder {
            user: user.to_uppercase(),
            password: password.to_uppercase(),
            dataset: dataset.to_uppercase(),
            volume: volume.to_uppercase(),
        }
    }

    /// Generate the complete job script for a record set
    ///
    /// The output carries four fixed-order segments: job card, delete step,
    /// define step and the repopulate step with inline data plus a catalog
    /// listing. Every surviving record appears byte-for-byte in the inline
    /// data - downstream verification depends on that, so no whitespace
    /// normalization is applied.
    ///
    /// `newest_first` declares the ordering of the supplied records for the
    /// windowing policy: set it when the caller supplies records
    /// newest-first, leave it unset for natural (oldest-first) order.
    ///
    /// An empty record set is not an error: segments 1-3 are emitted with a
    /// structurally valid, empty inline segment.
    pub fn build(&self, records: &[DatasetRecord], newest_first: bool) -> String {
        let window = Self::windowed(records, newest_first);

        let mut inline = window
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if !inline.is_empty() {
            inline.push('\n');
        }

        format!(
            "\
//DOGEVSM JOB (1),'DOGE VSAM SYNC',CLASS=A,MSGCLASS=H,MSGLEVEL=(1,1),\n\
//  USER={user},PASSWORD={password}\n\
//*\n\
//DELSTEP  EXEC PGM=IDCAMS\n\
//SYSPRINT DD  SYSOUT=*\n\
//SYSIN    DD  *\n\
 DELETE {dataset}\n\
 SET MAXCC = 0\n\
/*\n\
//DEFSTEP  EXEC PGM=IDCAMS\n\
//SYSPRINT DD  SYSOUT=*\n\
//SYSIN    DD  *\n\
 DEFINE CLUSTER (NAME({dataset}) -\n\
 VOLUMES({volume}) -\n\
 TRACKS(45 45) -\n\
 KEYS(10 0) -\n\
 RECORDSIZE(75 75) -\n\
 INDEXED)\n\
/*\n\
//LOADSTEP EXEC PGM=IDCAMS\n\
//SYSPRINT DD  SYSOUT=*\n\
//INDATA1  DD  *\n\
{inline}\
/*\n\
//SYSIN    DD  *\n\
 REPRO INFILE(INDATA1) OUTDATASET({dataset})\n\
 LISTCAT ALL ENTRY({dataset})\n\
/*\n\
//\n",
            user = self.user,
            password = self.password,
            dataset = self.dataset,
            volume = self.volume,
            inline = inline,
        )
    }

    /// Apply the capacity-windowing policy
    ///
    /// At or under [`MAX_RECORDS`] the input order is preserved untouched.
    /// Over the cap:
    ///
    /// - the two leading balance records always survive;
    /// - the remaining budget is filled with the most recent contiguous
    ///   window of the rest - the head when `newest_first`, the tail
    ///   otherwise;
    /// - the control record, when present, is never dropped: if it falls
    ///   outside the window, the oldest surviving transaction gives up its
    ///   slot and the control record is appended as the final entry.
    ///
    /// Without a control record in the input only the balance pair is
    /// guaranteed.
    fn windowed<'a>(records: &'a [DatasetRecord], newest_first: bool) -> Vec<&'a DatasetRecord> {
        if records.len() <= MAX_RECORDS {
            return records.iter().collect();
        }

        let (head, body) = records.split_at(BALANCE_SLOTS);
        let budget = MAX_RECORDS - head.len();

        let mut window: Vec<&DatasetRecord> = if newest_first {
            body.iter().take(budget).collect()
        } else {
            body[body.len() - budget..].iter().collect()
        };

        if let Some(control) = body.iter().find(|r| r.is_control()) {
            if !window.iter().any(|r| r.is_control()) {
                // The oldest surviving transaction: last slot for
                // newest-first input, first slot for natural order.
                if newest_first {
                    window.pop();
                } else {
                    window.remove(0);
                }
                window.push(control);
            }
        }

        let mut selected: Vec<&DatasetRecord> = head.iter().collect();
        selected.extend(window);
        selected
    }
}
