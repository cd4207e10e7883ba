//! Fixtures: minimal class files and jars written into temp directories.
#![allow(dead_code)]

use servicescope_api::{Artifact, DependencyCoordinate};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ENDPOINTS_SERVLET: &str = "com.google.api.server.spi.EndpointsServlet";
pub const HTTP_SERVLET: &str = "javax.servlet.http.HttpServlet";
pub const WEB_SERVLET: &str = "javax.servlet.annotation.WebServlet";
pub const WEB_INIT_PARAM: &str = "javax.servlet.annotation.WebInitParam";

const ACC_PUBLIC_SUPER: u16 = 0x0021;
const ACC_ANNOTATION_TYPE: u16 = 0x2601;
const ACC_PUBLIC_ABSTRACT: u16 = 0x0401;

pub enum Elem {
    Str(String),
    Nested(Ann),
    Array(Vec<Elem>),
}

pub struct Ann {
    pub type_name: String,
    pub elements: Vec<(String, Elem)>,
}

impl Ann {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            elements: Vec::new(),
        }
    }

    pub fn with(mut self, name: &str, value: Elem) -> Self {
        self.elements.push((name.to_string(), value));
        self
    }
}

/// `@WebServlet(initParams = {@WebInitParam(name = .., value = ..), ..})`
pub fn web_servlet(params: &[(&str, &str)]) -> Ann {
    let params = params
        .iter()
        .map(|(name, value)| {
            Elem::Nested(
                Ann::new(WEB_INIT_PARAM)
                    .with("name", Elem::Str(name.to_string()))
                    .with("value", Elem::Str(value.to_string())),
            )
        })
        .collect();
    Ann::new(WEB_SERVLET)
        .with("urlPatterns", Elem::Array(vec![Elem::Str("/_ah/api/*".to_string())]))
        .with("initParams", Elem::Array(params))
}

pub struct ClassSpec {
    pub name: String,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub access: u16,
    pub methods: Vec<String>,
    pub annotations: Vec<Ann>,
}

impl ClassSpec {
    pub fn class(name: &str, super_name: &str) -> Self {
        Self {
            name: name.to_string(),
            super_name: Some(super_name.to_string()),
            interfaces: Vec::new(),
            access: ACC_PUBLIC_SUPER,
            methods: vec!["<init>".to_string()],
            annotations: Vec::new(),
        }
    }

    pub fn annotation_type(name: &str, methods: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            super_name: Some("java.lang.Object".to_string()),
            interfaces: vec!["java.lang.annotation.Annotation".to_string()],
            access: ACC_ANNOTATION_TYPE,
            methods: methods.iter().map(|m| m.to_string()).collect(),
            annotations: Vec::new(),
        }
    }

    pub fn implementing(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    pub fn annotated(mut self, annotation: Ann) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Path of the class file relative to a classpath root.
    pub fn file_name(&self) -> String {
        format!("{}.class", self.name.replace('.', "/"))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut pool = Pool::default();
        let mut body = Vec::new();

        put_u2(&mut body, self.access);
        put_u2(&mut body, pool.class(&self.name));
        put_u2(&mut body, self.super_name.as_deref().map_or(0, |s| pool.class(s)));
        put_u2(&mut body, self.interfaces.len() as u16);
        for interface in &self.interfaces {
            put_u2(&mut body, pool.class(interface));
        }
        put_u2(&mut body, 0); // fields
        put_u2(&mut body, self.methods.len() as u16);
        for method in &self.methods {
            put_u2(&mut body, ACC_PUBLIC_ABSTRACT);
            put_u2(&mut body, pool.utf8(method));
            put_u2(&mut body, pool.utf8("()Ljava/lang/String;"));
            put_u2(&mut body, 0);
        }

        if self.annotations.is_empty() {
            put_u2(&mut body, 0);
        } else {
            let mut attribute = Vec::new();
            put_u2(&mut attribute, self.annotations.len() as u16);
            for annotation in &self.annotations {
                write_annotation(&mut attribute, &mut pool, annotation);
            }
            put_u2(&mut body, 1);
            put_u2(&mut body, pool.utf8("RuntimeVisibleAnnotations"));
            body.extend_from_slice(&(attribute.len() as u32).to_be_bytes());
            body.extend_from_slice(&attribute);
        }

        let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE];
        put_u2(&mut bytes, 0); // minor
        put_u2(&mut bytes, 52); // Java 8
        put_u2(&mut bytes, pool.count + 1);
        bytes.extend_from_slice(&pool.bytes);
        bytes.extend_from_slice(&body);
        bytes
    }
}

#[derive(Default)]
struct Pool {
    bytes: Vec<u8>,
    count: u16,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
}

impl Pool {
    fn utf8(&mut self, value: &str) -> u16 {
        if let Some(index) = self.utf8.get(value) {
            return *index;
        }
        self.bytes.push(1);
        put_u2(&mut self.bytes, value.len() as u16);
        self.bytes.extend_from_slice(value.as_bytes());
        self.count += 1;
        self.utf8.insert(value.to_string(), self.count);
        self.count
    }

    fn class(&mut self, dotted: &str) -> u16 {
        if let Some(index) = self.classes.get(dotted) {
            return *index;
        }
        let name_index = self.utf8(&dotted.replace('.', "/"));
        self.bytes.push(7);
        put_u2(&mut self.bytes, name_index);
        self.count += 1;
        self.classes.insert(dotted.to_string(), self.count);
        self.count
    }
}

fn put_u2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn write_annotation(out: &mut Vec<u8>, pool: &mut Pool, annotation: &Ann) {
    let descriptor = format!("L{};", annotation.type_name.replace('.', "/"));
    put_u2(out, pool.utf8(&descriptor));
    put_u2(out, annotation.elements.len() as u16);
    for (name, value) in &annotation.elements {
        put_u2(out, pool.utf8(name));
        write_element(out, pool, value);
    }
}

fn write_element(out: &mut Vec<u8>, pool: &mut Pool, element: &Elem) {
    match element {
        Elem::Str(value) => {
            out.push(b's');
            put_u2(out, pool.utf8(value));
        }
        Elem::Nested(annotation) => {
            out.push(b'@');
            write_annotation(out, pool, annotation);
        }
        Elem::Array(values) => {
            out.push(b'[');
            put_u2(out, values.len() as u16);
            for value in values {
                write_element(out, pool, value);
            }
        }
    }
}

/// Writes each class below `root` as a class file tree.
pub fn write_classes(root: &Path, classes: &[ClassSpec]) {
    for class in classes {
        let path = root.join(class.file_name());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, class.to_bytes()).unwrap();
    }
}

pub fn write_jar(path: &Path, classes: &[ClassSpec]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
    zip.write_all(b"Manifest-Version: 1.0\n").unwrap();
    for class in classes {
        zip.start_file(class.file_name(), options).unwrap();
        zip.write_all(&class.to_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Servlet 3.x API jar: defines the marker and entry annotations.
pub fn servlet_api_jar(dir: &Path) -> PathBuf {
    let path = dir.join("javax.servlet-api-3.1.0.jar");
    write_jar(
        &path,
        &[
            ClassSpec::class(HTTP_SERVLET, "javax.servlet.GenericServlet"),
            ClassSpec::class("javax.servlet.GenericServlet", "java.lang.Object")
                .implementing("javax.servlet.Servlet"),
            ClassSpec::annotation_type(
                WEB_SERVLET,
                &["name", "value", "urlPatterns", "loadOnStartup", "initParams", "asyncSupported"],
            ),
            ClassSpec::annotation_type(WEB_INIT_PARAM, &["name", "value", "description"]),
        ],
    );
    path
}

/// Endpoints framework jar: defines the base type.
pub fn framework_jar(dir: &Path) -> PathBuf {
    let path = dir.join("endpoints-framework-2.2.2.jar");
    write_jar(&path, &[ClassSpec::class(ENDPOINTS_SERVLET, HTTP_SERVLET)]);
    path
}

pub fn artifact(group: &str, name: &str, version: &str, location: &Path) -> Artifact {
    Artifact::new(DependencyCoordinate::new(group, name, version), location)
}

/// Dependency graph with an old servlet API (never opened), the current one and the framework.
pub fn dependency_graph(dir: &Path) -> Vec<Artifact> {
    vec![
        artifact("javax.servlet", "servlet-api", "2.5", &dir.join("does-not-exist.jar")),
        artifact("javax.servlet", "javax.servlet-api", "3.1.0", &servlet_api_jar(dir)),
        artifact("com.google.endpoints", "endpoints-framework", "2.2.2", &framework_jar(dir)),
        artifact("com.google.guava", "guava", "31.1-jre", &dir.join("guava.jar")),
    ]
}
