/// Plain-text node/triangle files
///
/// ```text
/// CUBE
/// 8
/// -117 -117 -117
/// ...
/// 12
/// 0 1 2
/// ...
/// ```
///
/// Line 1 is the mesh name, then a vertex count and one `x y z` line per
/// vertex (w is implied to be 1), then a triangle count and one line of three
/// zero-based vertex indices per triangle.
use nom::{
    branch::alt,
    character::complete::{digit1, line_ending, not_line_ending, space0, space1},
    combinator::{eof, map, map_res},
    multi::count,
    number::complete::double,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use log::info;

use crate::error::{GeometryError, Result};
use crate::geometry::{node, Mesh, Node, Triangle};
use crate::matrix::Matrix;

/// Write `mesh` under `name`. Every coordinate must be finite so the file reads back.
pub fn write_mesh<W: Write>(writer: &mut W, name: &str, mesh: &Mesh) -> Result<()> {
    check_finite(mesh)?;
    writeln!(writer, "{}", name)?;

    writeln!(writer, "{}", mesh.vertex_count())?;
    for i in 0..mesh.vertex_count() {
        writeln!(
            writer,
            "{} {} {}",
            mesh.nodes[(i, 0)],
            mesh.nodes[(i, 1)],
            mesh.nodes[(i, 2)]
        )?;
    }

    writeln!(writer, "{}", mesh.triangle_count())?;
    for t in &mesh.triangles {
        writeln!(writer, "{} {} {}", t.p1, t.p2, t.p3)?;
    }
    Ok(())
}

pub fn mesh_to_string(name: &str, mesh: &Mesh) -> Result<String> {
    let mut buffer = Vec::new();
    write_mesh(&mut buffer, name, mesh)?;
    String::from_utf8(buffer).map_err(|e| GeometryError::Parse {
        line: 1,
        message: e.to_string(),
    })
}

/// Save to `<dir>/<lowercase name>.txt`, creating `dir` if needed.
///
/// The name must be a single plain file name; anything that would resolve
/// outside `dir` is rejected before touching the filesystem.
pub fn save_to_dir<P: AsRef<Path>>(dir: P, name: &str, mesh: &Mesh) -> Result<PathBuf> {
    let file_name = file_name_for(name)?;
    check_finite(mesh)?;

    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);

    let mut writer = BufWriter::new(File::create(&path)?);
    write_mesh(&mut writer, name, mesh)?;
    writer.flush()?;

    info!("saved {} to {}", name, path.display());
    Ok(path)
}

fn file_name_for(name: &str) -> Result<String> {
    let stem = name.trim().to_lowercase();
    if stem.contains(['/', '\\']) {
        return Err(GeometryError::InvalidName(name.to_string()));
    }
    let mut components = Path::new(&stem).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => Ok(format!("{}.txt", part.to_string_lossy())),
        _ => Err(GeometryError::InvalidName(name.to_string())),
    }
}

fn check_finite(mesh: &Mesh) -> Result<()> {
    match (0..mesh.vertex_count())
        .find(|&row| (0..3).any(|c| !mesh.nodes[(row, c)].is_finite()))
    {
        Some(row) => Err(GeometryError::NonFiniteCoordinate { row }),
        None => Ok(()),
    }
}

pub fn load_file<P: AsRef<Path>>(path: P) -> Result<(String, Mesh)> {
    let text = fs::read_to_string(path.as_ref())?;
    let (name, mesh) = parse_mesh(&text)?;
    info!("read {} from {}", name, path.as_ref().display());
    Ok((name, mesh))
}

/// Parse a mesh file, returning its name and mesh
pub fn parse_mesh(input: &str) -> Result<(String, Mesh)> {
    let (rest, (name, nodes, triangles)) =
        parse_mesh_impl(input).map_err(|e| parse_error(input, e))?;

    if !rest.trim().is_empty() {
        return Err(GeometryError::Parse {
            line: line_of(input, rest),
            message: "unexpected data after the last triangle".to_string(),
        });
    }

    let mesh = Mesh::new(Matrix::from_rows(&nodes), triangles);
    mesh.validate()?;
    Ok((name, mesh))
}

fn parse_mesh_impl(input: &str) -> IResult<&str, (String, Vec<Node>, Vec<Triangle>)> {
    let (input, name) = terminated(not_line_ending, line_ending)(input)?;
    let (input, vertex_count) = parse_count(input)?;
    let (input, nodes) = count(parse_vertex, vertex_count)(input)?;
    let (input, triangle_count) = parse_count(input)?;
    let (input, triangles) = count(parse_triangle, triangle_count)(input)?;

    Ok((input, (name.trim().to_string(), nodes, triangles)))
}

fn end_of_line(input: &str) -> IResult<&str, &str> {
    preceded(space0, alt((line_ending, eof)))(input)
}

fn parse_index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

fn parse_count(input: &str) -> IResult<&str, usize> {
    terminated(preceded(space0, parse_index), end_of_line)(input)
}

fn parse_vertex(input: &str) -> IResult<&str, Node> {
    map(
        terminated(
            tuple((
                preceded(space0, double),
                preceded(space1, double),
                preceded(space1, double),
            )),
            end_of_line,
        ),
        |(x, y, z)| node(x, y, z),
    )(input)
}

fn parse_triangle(input: &str) -> IResult<&str, Triangle> {
    map(
        terminated(
            tuple((
                delimited(space0, parse_index, space1),
                terminated(parse_index, space1),
                parse_index,
            )),
            end_of_line,
        ),
        |(p1, p2, p3)| Triangle::new(p1, p2, p3),
    )(input)
}

fn line_of(input: &str, rest: &str) -> usize {
    let consumed = input.len().saturating_sub(rest.len());
    input[..consumed].matches('\n').count() + 1
}

fn parse_error(input: &str, err: nom::Err<nom::error::Error<&str>>) -> GeometryError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => GeometryError::Parse {
            line: line_of(input, e.input),
            message: format!("expected {:?}", e.code),
        },
        nom::Err::Incomplete(_) => GeometryError::Parse {
            line: line_of(input, ""),
            message: "unexpected end of file".to_string(),
        },
    }
}
