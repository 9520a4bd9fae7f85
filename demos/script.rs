use hikiko_script::{
    config::ConverterConfig, convert_lines, diagnostics::LogSink, lexer::split_script_lines,
    MessageVec,
};

fn main() {
    env_logger::init();

    let script = "Sunny[SU 2]: Hello [~]world[~]!\nBasil[BA 1]: *Hi* Sunny.\nno colon\n";
    let lines = split_script_lines("demo.txt", script);
    let messages = convert_lines(&lines, &ConverterConfig::default(), &mut LogSink).unwrap();

    println!("{}", MessageVec(&messages));
}
