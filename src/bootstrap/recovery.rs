use crate::zfx_id::Id;
use crate::{Error, Result};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Raw containers persisted by a previous run, in acceptance order.
///
/// On disk a record is a text file with one hex encoded container per line, the last
/// line being the tip of the accepted history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryRecord {
    containers: Vec<Vec<u8>>,
}

impl RecoveryRecord {
    /// Builds a record from raw containers. A record is never empty.
    pub fn new(containers: Vec<Vec<u8>>) -> Result<Self> {
        if containers.is_empty() {
            return Err(Error::EmptyRecovery);
        }
        Ok(RecoveryRecord { containers })
    }

    /// The location of the record of `chain_id` within `recovery_dir`.
    pub fn path(recovery_dir: &Path, chain_id: &Id) -> PathBuf {
        recovery_dir.join(format!("{}.txt", chain_id))
    }

    /// Reads the record of `chain_id` from `recovery_dir`, `None` if there is no record.
    pub fn load(recovery_dir: &Path, chain_id: &Id) -> Result<Option<Self>> {
        let path = Self::path(recovery_dir, chain_id);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path)?;
        Self::from_reader(BufReader::new(file)).map(Some)
    }

    /// Decodes a record. Blank lines are skipped, any other line which is not valid hex
    /// is an error.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut containers = vec![];
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let bytes =
                hex::decode(line).map_err(|error| Error::RecoveryDecode { line: i + 1, error })?;
            containers.push(bytes);
        }
        Self::new(containers)
    }

    /// Encodes the record in its on-disk format.
    pub fn encode(&self) -> String {
        let mut s = String::new();
        for container in self.containers.iter() {
            s.push_str(&hex::encode(container));
            s.push('\n');
        }
        s
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn containers(&self) -> &[Vec<u8>] {
        &self.containers
    }

    /// The id of the last container, which is trusted as the accepted tip.
    pub fn tip(&self) -> Id {
        // `new` rejects empty records
        let last = self.containers.last().map(|c| c.as_slice()).unwrap_or_default();
        Id::new(last)
    }

    pub fn into_containers(self) -> Vec<Vec<u8>> {
        self.containers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let input = "00ff\n\n  0102 \n";
        let record = RecoveryRecord::from_reader(input.as_bytes()).unwrap();
        assert_eq!(record.containers(), &[vec![0x00, 0xff], vec![0x01, 0x02]]);
        assert_eq!(record.tip(), Id::new(&[0x01, 0x02]));
    }

    #[test]
    fn test_decode_failure_reports_line() {
        let input = "00ff\nzz\n";
        match RecoveryRecord::from_reader(input.as_bytes()) {
            Err(Error::RecoveryDecode { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_record_is_rejected() {
        match RecoveryRecord::from_reader("\n\n".as_bytes()) {
            Err(Error::EmptyRecovery) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_encode_decode() {
        let record = RecoveryRecord::new(vec![b"genesis".to_vec(), b"block 1".to_vec()]).unwrap();
        let decoded = RecoveryRecord::from_reader(record.encode().as_bytes()).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn test_load_missing_record() {
        let dir = std::env::temp_dir().join(format!("recovery-{}", Id::generate()));
        assert_eq!(RecoveryRecord::load(&dir, &Id::one()).unwrap(), None);
    }

    #[test]
    fn test_load() {
        let dir = std::env::temp_dir().join(format!("recovery-{}", Id::generate()));
        std::fs::create_dir_all(&dir).unwrap();
        let record = RecoveryRecord::new(vec![vec![1, 2, 3]]).unwrap();
        std::fs::write(RecoveryRecord::path(&dir, &Id::one()), record.encode()).unwrap();
        assert_eq!(RecoveryRecord::load(&dir, &Id::one()).unwrap(), Some(record));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
