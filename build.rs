use json::JsonValue;
use std::env;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn main() {
    let mut tag_code = String::new();
    tag_code += &parse_tag_file("src/tags/ifd.json", "ifd", "IfdType::Ifd");
    tag_code += &parse_tag_file("src/tags/exif.json", "exif", "IfdType::Exif");
    tag_code += &parse_tag_file("src/tags/gps_info.json", "gps_info", "IfdType::GpsInfo");

    let out_dir = env::var("OUT_DIR").unwrap();
    let path = Path::new(&out_dir).join("tag_data.rs");
    let mut f = File::create(path).unwrap();
    f.write_all(tag_code.as_bytes()).unwrap();
}

fn parse_tag_file(path: &str, name: &str, ifd_type: &str) -> String {
    println!("cargo:rerun-if-changed={path}");
    let contents = fs::read_to_string(path).expect("Unable to read file");
    let mut json: JsonValue = json::parse(&contents).expect("Unable to parse JSON");
    let entries: Vec<_> = json
        .members_mut()
        .map(|entry| parse_tag_descriptor(entry.take(), ifd_type))
        .collect();
    let definitions: String = entries.iter().map(|(_, code)| code.to_string()).collect();
    let arr_contents: String = entries.iter().fold(String::new(), |mut output, (name, _)| {
        let _ = write!(output, "{name}, ");
        output
    });
    let len = entries.len();
    format!(
        "
        /// Tags contained in the {name} namespace
        #[allow(non_upper_case_globals)]
        pub mod {name} {{
            #[allow(unused_imports)]
            use super::{{ExifTagDescriptor, IfdType}};
            pub(crate) const ALL: [ExifTagDescriptor; {len}] = [{arr_contents}];
            {definitions}
        }}
    "
    )
}

fn parse_tag_descriptor(mut json: JsonValue, ifd_type: &str) -> (String, String) {
    let name = json.remove("name").take_string().unwrap();
    let tag = u16::from_str_radix(&json.remove("tag").take_string().unwrap()[2..], 16).unwrap();
    let description = json.remove("description").take_string().unwrap();

    let code = format!(
        r#"
        ExifTagDescriptor {{
            name: {name:?},
            tag: {tag},
            ifd_type: {ifd_type},
            description: {description:?},
        }}
    "#
    );
    let doc_description = doc_lines(description);
    let definition = format!(
        "
        {doc_description}
        ///
        /// tag: `{tag:#06X}`
        pub const {name}: ExifTagDescriptor = {code};\n
    "
    );
    (name, definition)
}

fn doc_lines(lines: String) -> String {
    lines.lines().fold(String::new(), |mut out, s| {
        let _ = writeln!(out, "/// {s}");
        out
    })
}
