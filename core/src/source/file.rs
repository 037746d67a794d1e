use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    pub src: String,
    pub line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(path: PathBuf, src: String) -> Self {
        // 计算每一行的起始位置
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        let name = path.to_string_lossy().to_string();

        Self {
            path,
            name,
            src,
            line_starts,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)?;
        Ok(Self::new(path.to_path_buf(), src))
    }

    /// 每一遍扫描都使用一个新的游标
    pub fn cursor(&self) -> LineCursor<'_> {
        LineCursor {
            lines: self.src.lines(),
            number: 0,
        }
    }

    /// 取第 line 行 (1-based) 的文本，不含换行符
    pub fn line_text(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        if start > self.src.len() || (start == self.src.len() && line > 1) {
            return None;
        }
        let end = self
            .line_starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.src.len());
        Some(self.src[start..end].trim_end_matches('\r'))
    }
}

/// 逐行读取，行号从 1 开始
pub struct LineCursor<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
}

impl<'a> LineCursor<'a> {
    /// 最近读出的行号
    pub fn line_number(&self) -> usize {
        self.number
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.lines.next()?;
        self.number += 1;
        Some((self.number, text))
    }
}
