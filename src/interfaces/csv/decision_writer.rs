use crate::domain::decision::Decision;
use crate::error::Result;
use std::io::Write;

/// Writes decisions as CSV: `user_id,trip_id,place_id,liked`.
pub struct DecisionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> DecisionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_decisions<I>(&mut self, decisions: I) -> Result<()>
    where
        I: IntoIterator<Item = Decision>,
    {
        let mut empty = true;
        for decision in decisions {
            self.writer.serialize(decision)?;
            empty = false;
        }
        if empty {
            // serialize writes the header lazily; keep it for an empty report
            self.writer
                .write_record(["user_id", "trip_id", "place_id", "liked"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
