//! Writing a sealed model in CPLEX LP text format.

use std::fs::File;
use std::io::{BufWriter,Write};
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::model::{Model,Sense};
use crate::solver::BoundKind;

/// Map a display name to a valid LP name. Brackets become parentheses, other characters outside
/// the LP name alphabet become `_`.
fn lp_name(name : &str) -> String {
    let mut s : String = name.chars().map(|c| match c {
        '[' => '(',
        ']' => ')',
        c if c.is_ascii_alphanumeric() => c,
        '!' | '"' | '#' | '$' | '%' | '&' | '(' | ')' | '/' | ',' | '.' | ';' | '?' | '@' | '_' | '`' | '\'' | '{' | '}' | '|' | '~' => c,
        _ => '_'
    }).collect();
    if s.starts_with(|c : char| c.is_ascii_digit() || c == '.') || s.is_empty() {
        s.insert(0,'_');
    }
    s
}

fn write_linear<W : Write>(w : &mut W, entries : &[(usize,f64)], names : &[String]) -> std::io::Result<()> {
    if entries.is_empty() { return write!(w," 0"); }
    for (k,&(j,c)) in entries.iter().enumerate() {
        if k == 0 {
            write!(w," {} {}",c,names[j])?;
        }
        else if c < 0.0 {
            write!(w," - {} {}",-c,names[j])?;
        }
        else {
            write!(w," + {} {}",c,names[j])?;
        }
        if k % 8 == 7 { writeln!(w)?; }
    }
    Ok(())
}

impl Model {
    /// Write the model in LP format.
    ///
    /// Double bounded rows are written as two rows with the suffixes `.lo` and `.hi`. Free rows are
    /// written as comments.
    pub fn write_problem<W : Write>(&self, w : &mut W) -> Result<()> {
        let columns = self.columns()?;
        let rows = self.rows()?;
        let obj = self.objective_row()?;
        let names : Vec<String> = columns.iter().map(|c| lp_name(&c.name)).collect();

        writeln!(w,"\\ Problem: {}",self.name().unwrap_or("model"))?;
        writeln!(w,"{}",match obj.sense { Sense::Minimize => "Minimize", Sense::Maximize => "Maximize" })?;
        write!(w," {}:",lp_name(&obj.name))?;
        if !obj.entries.is_empty() { write_linear(w,&obj.entries,&names)?; }
        if obj.constant != 0.0 || obj.entries.is_empty() {
            write!(w," {} {}",if obj.constant < 0.0 { "-" } else { "+" },obj.constant.abs())?;
        }
        writeln!(w)?;

        writeln!(w,"Subject To")?;
        for r in rows.iter() {
            let name = lp_name(&r.name);
            match r.bounds {
                BoundKind::Free => writeln!(w,"\\ free row {}",name)?,
                BoundKind::Lower(l) => {
                    write!(w," {}:",name)?; write_linear(w,&r.entries,&names)?; writeln!(w," >= {}",l)?;
                },
                BoundKind::Upper(u) => {
                    write!(w," {}:",name)?; write_linear(w,&r.entries,&names)?; writeln!(w," <= {}",u)?;
                },
                BoundKind::Fixed(v) => {
                    write!(w," {}:",name)?; write_linear(w,&r.entries,&names)?; writeln!(w," = {}",v)?;
                },
                BoundKind::Double(l,u) => {
                    write!(w," {}.lo:",name)?; write_linear(w,&r.entries,&names)?; writeln!(w," >= {}",l)?;
                    write!(w," {}.hi:",name)?; write_linear(w,&r.entries,&names)?; writeln!(w," <= {}",u)?;
                }
            }
        }

        writeln!(w,"Bounds")?;
        for (c,name) in columns.iter().zip(names.iter()) {
            match c.bounds {
                BoundKind::Free        => writeln!(w," {} free",name)?,
                BoundKind::Lower(l)    => writeln!(w," {} >= {}",name,l)?,
                BoundKind::Upper(u)    => writeln!(w," -inf <= {} <= {}",name,u)?,
                BoundKind::Double(l,u) => writeln!(w," {} <= {} <= {}",l,name,u)?,
                BoundKind::Fixed(v)    => writeln!(w," {} = {}",name,v)?,
            }
        }

        let integers : Vec<&String> = columns.iter().zip(names.iter()).filter(|(c,_)| c.is_integer).map(|(_,n)| n).collect();
        if !integers.is_empty() {
            writeln!(w,"General")?;
            for chunk in integers.chunks(8) {
                for n in chunk { write!(w," {}",n)?; }
                writeln!(w)?;
            }
        }
        writeln!(w,"End")?;
        debug!("wrote LP problem: {} columns, {} rows",columns.len(),rows.len());
        Ok(())
    }

    /// Write the model in LP format to a file.
    pub fn write_problem_file<P>(&self, filename : P) -> Result<()> where P : AsRef<Path> {
        let mut w = BufWriter::new(File::create(filename)?);
        self.write_problem(&mut w)?;
        w.flush()?;
        Ok(())
    }
}
