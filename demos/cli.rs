use ratmat::{Calculator, Config, Format, Listing};
use std::io::{BufRead, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const HELP: &str = "\
Commands:
  new ROWS COLUMNS            add a matrix of zeroes
  set NAME ROW COLUMN VALUE   change one element (rows and columns start at 0)
  show NAME                   print a matrix
  list                        list every matrix
  delete NAME...              delete matrices
  format fraction|decimal     change how numbers are printed
  preview EXPRESSION          evaluate without saving the result
  EXPRESSION                  evaluate and save, e.g. (A' + B')&";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let mut calculator = Calculator::new(Config::from_env());
    let stdin = std::io::stdin();

    for line in BufReader::new(stdin.lock()).lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Err(e) = execute(&mut calculator, line) {
            eprintln!("Unable to run \"{}\": {}", line, e);
        }
    }

    Ok(())
}

fn execute(
    calculator: &mut Calculator,
    line: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    match (command, args.as_slice()) {
        ("help", []) => println!("{}", HELP),
        ("new", [rows, columns]) => {
            let position =
                calculator.create_blank(rows.parse()?, columns.parse()?)?;
            let name = calculator.store().name(position).unwrap_or_default();
            println!("Created {}", name);
        },
        ("set", [name, row, column, value]) => {
            let position =
                calculator.store().find(name).ok_or_else(|| unknown(name))?;
            let (row, column): (usize, usize) =
                (row.parse()?, column.parse()?);
            calculator.set_element(position, row, column, value)?;
        },
        ("show", [name]) => {
            let matrix = calculator.get(name).ok_or_else(|| unknown(name))?;
            print!("{}", calculator.render(matrix));
        },
        ("list", []) => {
            for listing in calculator.list() {
                let Listing {
                    name, rows, columns, ..
                } = listing;
                println!("{} ({}x{})", name, rows, columns);
            }
        },
        ("delete", names) if !names.is_empty() => {
            let deleted = calculator.delete(names.iter().copied());
            println!("Deleted {} matrices", deleted);
        },
        ("format", [format]) => {
            let format: Format = format.parse()?;
            calculator.set_format(format);
        },
        ("preview", _) => {
            let expression = line.trim_start_matches("preview").trim();
            let evaluation = calculator.evaluate(expression, false, true)?;
            print!("{}", calculator.render(&evaluation.matrix));
        },
        _ => {
            let evaluation = calculator.evaluate(line, true, true)?;
            if let Some(name) = &evaluation.name {
                println!("{} =", name);
            }
            if evaluation.preview {
                print!("{}", calculator.render(&evaluation.matrix));
            }
        },
    }

    Ok(())
}

fn unknown(name: &str) -> String {
    format!("There is no matrix called \"{}\"", name)
}
