#![allow(dead_code)]
use assert_cmd::Command;
use expenses::run_app;
use std::path::Path;

pub fn test_args(args: &[&str]) {
    let mut function_args: Vec<&str> = vec!["testing"];
    for arg in args {
        function_args.push(arg);
    }
    function_args.push("--args-only");
    let res = run_app(function_args.iter().map(|x| x.to_string()).collect());
    assert!(res.is_ok());
}

pub fn test_err(args: &[&str]) {
    let mut function_args: Vec<&str> = vec!["testing"];
    for arg in args {
        function_args.push(arg);
    }
    function_args.push("--args-only");
    let res = run_app(function_args.iter().map(|x| x.to_string()).collect());
    assert!(res.is_err());
}

/// The binary, run inside ```dir``` without any init file
pub fn expenses(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::cargo_bin("expenses").unwrap();
    command
        .current_dir(dir)
        .env_remove("EXPENSES_LOG")
        .args(args)
        .arg("--args-only");
    command
}

pub fn stdout(command: &mut Command) -> String {
    let assert = command.assert().success();
    String::from_utf8(assert.get_output().to_owned().stdout).unwrap()
}

pub fn stderr_of_failure(command: &mut Command) -> String {
    let assert = command.assert().failure().code(1);
    String::from_utf8(assert.get_output().to_owned().stderr).unwrap()
}
