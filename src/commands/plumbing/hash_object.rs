use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let blob = self.workspace().parse_blob(Path::new(object_path))?;
        let object_id = blob.object_id()?;

        writeln!(self.writer(), "{}", object_id)?;

        if write {
            self.database().store(&blob)?;
        }

        Ok(())
    }
}
