use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

pub struct FileOps {
    file_path: PathBuf,
}

impl FileOps {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn load_lines(&self) -> io::Result<Vec<String>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.file_path)?);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    /// Replaces the file with `lines`.
    pub fn write_lines<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> io::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.file_path)?);
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }
}
