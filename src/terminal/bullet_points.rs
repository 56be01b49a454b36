use indicatif::ProgressBar;

const INDENT_SIZE: usize = 2;

/// Prints nested bullet point lists, e.g. year, month and transactions below each other.
pub struct BulletPointPrinter<W: LineWriter + Clone> {
    writer: W,
    nesting: usize,
}

impl<W: LineWriter + Clone> BulletPointPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, nesting: 0 }
    }

    pub fn print_item(&self, message: impl std::fmt::Display) {
        let indent = " ".repeat(self.nesting * INDENT_SIZE);
        self.writer.write_line(&format!("{}• {}", indent, message));
    }

    pub fn indent(&self) -> Self {
        self.indent_by(1)
    }

    pub fn indent_by(&self, levels: usize) -> Self {
        Self {
            writer: self.writer.clone(),
            nesting: self.nesting + levels,
        }
    }
}

impl BulletPointPrinter<StdoutLineWriter> {
    pub fn new_stdout() -> Self {
        Self::new(StdoutLineWriter)
    }
}

impl<'a> BulletPointPrinter<ProgressBarLineWriter<'a>> {
    pub fn new_progress_bar(bar: &'a ProgressBar) -> Self {
        Self::new(ProgressBarLineWriter { bar })
    }
}

pub trait LineWriter {
    fn write_line(&self, line: &str);
}

#[derive(Clone, Copy)]
pub struct StdoutLineWriter;
impl LineWriter for StdoutLineWriter {
    fn write_line(&self, line: &str) {
        println!("{}", line);
    }
}

/// Prints above a running progress bar without tearing it.
#[derive(Clone, Copy)]
pub struct ProgressBarLineWriter<'a> {
    bar: &'a ProgressBar,
}

impl<'a> LineWriter for ProgressBarLineWriter<'a> {
    fn write_line(&self, line: &str) {
        self.bar.println(line)
    }
}
