/// One sequenced fragment: nucleotide symbols plus per-base Phred scores.
///
/// Quality values are already decoded (no ASCII offset). The two vectors are
/// expected to have equal length; the aggregator rejects reads where they
/// don't.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Read {
    pub id: Option<String>,
    pub sequence: Vec<u8>,
    pub quality: Vec<u8>,
}

impl Read {
    pub fn new(sequence: impl Into<Vec<u8>>, quality: impl Into<Vec<u8>>) -> Self {
        Self {
            id: None,
            sequence: sequence.into(),
            quality: quality.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn is_well_formed(&self) -> bool {
        self.sequence.len() == self.quality.len()
    }
}
