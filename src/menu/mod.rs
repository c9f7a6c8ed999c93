//! Interactive dispatch loop
//!
//! A thin menu translating numbered choices into tree calls. Generic over
//! its reader and writer so scripted input drives it in tests; the binary
//! hands it locked stdin/stdout. All terminal traffic happens here; the
//! tree itself never prints.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::bench::{self, BenchConfig};
use crate::persist;
use crate::tree::BlockTree;
use crate::value::Scalar;
use crate::Result;

/// Menu over a tree of `T` values
#[derive(Debug)]
pub struct Menu<T> {
    tree: BlockTree<T>,
    text_path: PathBuf,
    binary_path: PathBuf,
    report_path: PathBuf,
}

impl<T: Scalar> Menu<T> {
    /// Create a menu around a fresh tree of the given leaf capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: BlockTree::new(capacity),
            text_path: PathBuf::from("tree.txt"),
            binary_path: PathBuf::from("tree.bin"),
            report_path: PathBuf::from("benchmark.txt"),
        }
    }

    /// The tree behind the menu (tests inspect it after scripted runs)
    pub fn tree(&self) -> &BlockTree<T> {
        &self.tree
    }

    /// Run the dispatch loop until choice `0` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        loop {
            print_choices(output)?;
            write!(output, "Enter your choice: ")?;
            output.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(());
            };
            let Ok(choice) = line.trim().parse::<u32>() else {
                writeln!(output, "Invalid choice. Please try again.")?;
                continue;
            };
            match choice {
                1 => self.insert(input, output)?,
                2 => self.insert_by_index(input, output)?,
                3 => self.insert_with_order_save(input, output)?,
                4 => self.remove_by_value(input, output)?,
                5 => self.remove_by_index(input, output)?,
                6 => self.get_by_index(input, output)?,
                7 => self.sort(output)?,
                8 => write!(output, "{}", self.tree.render_levels())?,
                9 => self.traverse(output)?,
                10 => {
                    self.tree.clear();
                    writeln!(output, "Tree cleared.")?;
                }
                11 => self.save_text(output)?,
                12 => self.load_text(output)?,
                13 => self.save_binary(output)?,
                14 => self.load_binary(output)?,
                15 => self.benchmark(output)?,
                0 => {
                    writeln!(output, "Exiting...")?;
                    return Ok(());
                }
                _ => writeln!(output, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn insert<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        let Some(value) = prompt_value(input, output, "Enter value to add: ")? else {
            return Ok(());
        };
        self.tree.insert(value);
        writeln!(output, "Value inserted.")?;
        Ok(())
    }

    fn insert_by_index<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(index) = prompt_index(input, output, "Enter target index: ")? else {
            return Ok(());
        };
        let Some(value) = prompt_value(input, output, "Enter value to add: ")? else {
            return Ok(());
        };
        match self.tree.insert_by_index(index, value) {
            Ok(()) => writeln!(output, "Value inserted at index {index}.")?,
            Err(err) => writeln!(output, "Insert failed: {err}")?,
        }
        Ok(())
    }

    fn insert_with_order_save<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(value) = prompt_value(input, output, "Enter value to add: ")? else {
            return Ok(());
        };
        match self.tree.insert_with_order_save(value) {
            Ok(()) => writeln!(output, "Value inserted, order preserved.")?,
            Err(err) => writeln!(output, "Insert declined: {err}")?,
        }
        Ok(())
    }

    fn remove_by_value<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(value) = prompt_value(input, output, "Enter value to remove: ")? else {
            return Ok(());
        };
        let removed = self.tree.remove(value);
        if removed > 0 {
            writeln!(output, "Removed {removed} occurrence(s).")?;
        } else {
            writeln!(output, "Value not found.")?;
        }
        Ok(())
    }

    fn remove_by_index<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(index) = prompt_index(input, output, "Enter index to remove: ")? else {
            return Ok(());
        };
        match self.tree.remove_by_index(index) {
            Ok(value) => writeln!(output, "Removed {value} from index {index}.")?,
            Err(err) => writeln!(output, "Removal failed: {err}")?,
        }
        Ok(())
    }

    fn get_by_index<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let Some(index) = prompt_index(input, output, "Enter index: ")? else {
            return Ok(());
        };
        match self.tree.get_by_index(index) {
            Ok(value) => writeln!(output, "Value at index {index}: {value}")?,
            Err(err) => writeln!(output, "Lookup failed: {err}")?,
        }
        Ok(())
    }

    fn sort<W: Write>(&mut self, output: &mut W) -> Result<()> {
        match self.tree.sort() {
            Ok(true) => writeln!(output, "Tree sorted.")?,
            Ok(false) => writeln!(output, "Nothing to sort: tree is empty.")?,
            Err(err) => writeln!(output, "Sort failed: {err}")?,
        }
        Ok(())
    }

    fn traverse<W: Write>(&self, output: &mut W) -> Result<()> {
        let values = self.tree.to_vec();
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        writeln!(output, "Traversal: {}", rendered.join(" "))?;
        Ok(())
    }

    fn save_text<W: Write>(&self, output: &mut W) -> Result<()> {
        match persist::save_text_file(&self.tree, &self.text_path) {
            Ok(()) => writeln!(output, "Tree saved to {}.", self.text_path.display())?,
            Err(err) => writeln!(output, "Save failed: {err}")?,
        }
        Ok(())
    }

    fn load_text<W: Write>(&mut self, output: &mut W) -> Result<()> {
        match persist::load_text_file(&mut self.tree, &self.text_path) {
            Ok(()) => writeln!(output, "Tree loaded from {}.", self.text_path.display())?,
            Err(err) => writeln!(output, "Load failed: {err}")?,
        }
        Ok(())
    }

    fn save_binary<W: Write>(&self, output: &mut W) -> Result<()> {
        match persist::save_binary_file(&self.tree, &self.binary_path) {
            Ok(()) => writeln!(output, "Tree saved to {}.", self.binary_path.display())?,
            Err(err) => writeln!(output, "Save failed: {err}")?,
        }
        Ok(())
    }

    fn load_binary<W: Write>(&mut self, output: &mut W) -> Result<()> {
        match persist::load_binary_file(&mut self.tree, &self.binary_path) {
            Ok(()) => writeln!(output, "Tree loaded from {}.", self.binary_path.display())?,
            Err(err) => writeln!(output, "Load failed: {err}")?,
        }
        Ok(())
    }

    fn benchmark<W: Write>(&self, output: &mut W) -> Result<()> {
        let report = bench::run(&BenchConfig::new());
        match bench::write_report(&report, &self.report_path) {
            Ok(()) => writeln!(
                output,
                "Benchmark complete. Report written to {}.",
                self.report_path.display()
            )?,
            Err(err) => writeln!(output, "Benchmark report failed: {err}")?,
        }
        Ok(())
    }
}

fn print_choices<W: Write>(output: &mut W) -> Result<()> {
    writeln!(
        output,
        "\n=== Tree Menu ===\n\
         1. Add value\n\
         2. Add value at index\n\
         3. Add value preserving order\n\
         4. Remove by value\n\
         5. Remove by index\n\
         6. Get by index\n\
         7. Sort\n\
         8. Print layout\n\
         9. Traverse\n\
         10. Clear\n\
         11. Save to text file\n\
         12. Load from text file\n\
         13. Save to binary file\n\
         14. Load from binary file\n\
         15. Benchmark\n\
         0. Exit"
    )?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn prompt_value<T: Scalar, R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<T>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    match line.trim().parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            writeln!(output, "Invalid value.")?;
            Ok(None)
        }
    }
}

fn prompt_index<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<usize>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    match line.trim().parse::<usize>() {
        Ok(index) => Ok(Some(index)),
        Err(_) => {
            writeln!(output, "Invalid index.")?;
            Ok(None)
        }
    }
}
