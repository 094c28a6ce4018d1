use fountain_script::{Conf, FountainScript, ParserType};
use std::env;
use std::process;

fn usage(program: &str) {
    println!(
        "Usage: {} <fountain_file> [--markup] [--conf conf.json] [--outline out.json] [--characters out.json] [--write out.fountain]",
        program
    );
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
        return;
    }

    let file_path = &args[1];
    let mut conf = Conf::default();
    let mut outline_path: Option<String> = None;
    let mut characters_path: Option<String> = None;
    let mut write_path: Option<String> = None;
    let mut force_markup = false;

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--markup" => force_markup = true,
            "--conf" => match rest.next().map(Conf::from_json_file) {
                Some(Ok(loaded)) => conf = loaded,
                Some(Err(e)) => {
                    eprintln!("读取配置失败: {}", e);
                    process::exit(1);
                }
                None => {
                    usage(&args[0]);
                    process::exit(1);
                }
            },
            "--outline" => outline_path = rest.next().cloned(),
            "--characters" => characters_path = rest.next().cloned(),
            "--write" => write_path = rest.next().cloned(),
            other => {
                eprintln!("未知参数: {}", other);
                usage(&args[0]);
                process::exit(1);
            }
        }
    }
    if force_markup {
        conf.parser = ParserType::Markup;
    }

    let script = match FountainScript::from_file_with_conf(file_path, &conf) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("读取文件失败: {}", e);
            process::exit(1);
        }
    };

    let characters = script.extract_characters();
    let outline = script.extract_outline_with(&conf);

    println!("解析完成！");
    println!("元素数量: {}", script.elements.len());
    println!("标题页条目: {}", script.title_page.len());
    println!("角色数量: {}", characters.len());
    println!("大纲节点: {}", outline.len());

    let mut failed = false;
    if let Some(path) = outline_path {
        match script.write_outline_json(&path) {
            Ok(()) => println!("大纲已保存到: {}", path),
            Err(e) => {
                eprintln!("保存大纲失败: {}", e);
                failed = true;
            }
        }
    }
    if let Some(path) = characters_path {
        match script.write_characters_json(&path) {
            Ok(()) => println!("角色统计已保存到: {}", path),
            Err(e) => {
                eprintln!("保存角色统计失败: {}", e);
                failed = true;
            }
        }
    }
    if let Some(path) = write_path {
        match script.write_to_file(&path) {
            Ok(()) => println!("剧本已保存到: {}", path),
            Err(e) => {
                eprintln!("保存剧本失败: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
