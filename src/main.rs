use circlescript::compile;

fn main() {
    // Set up logging for development
    env_logger::init();

    // Compile the sentence given on the command line and print the tree
    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let tree = compile(&text);
    match tree.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Failed to serialize sentence tree: {err}"),
    }
}
