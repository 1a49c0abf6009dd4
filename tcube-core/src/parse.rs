//! Parsers for the textual vector and transform formats
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, space0},
    combinator::{all_consuming, map, value},
    multi::separated_list1,
    number::complete::float,
    sequence::{delimited, pair, preceded},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::Vector;
use crate::transform::{Matrix, Transform};

#[derive(Debug, Clone, PartialEq)]
enum TransformExpr {
    Identity,
    /// Angles in degrees about the x, y and z axes
    Rotate(Vec<f32>),
    Scale(Vec<f32>),
    Coefficients(Vec<f32>),
}

/// Parse up to three comma-separated numbers, e.g. `0,0,-2`.
///
/// Missing trailing components are zero.
pub fn parse_vector(input: &str) -> Result<Vector> {
    let values = finish(input, number_list)?;
    if values.len() > 3 {
        return Err(Error::Parse(format!(
            "expected at most 3 components, found {}",
            values.len()
        )));
    }

    let mut components = [0.0; 3];
    components[..values.len()].copy_from_slice(&values);
    Ok(Vector::from(components))
}

/// Parse a transform description:
///
/// - `eye` or `identity`
/// - `r,X,Y,Z`: rotation by X, Y and Z degrees about the respective axes,
///   missing angles are zero
/// - `s,X,Y,Z` or `s,K`: scale per axis or uniformly
/// - `m,A,B,C,D,E,F,G,H,I`: nine row-major coefficients
pub fn parse_transform(input: &str) -> Result<Matrix> {
    match finish(input, transform_expr)? {
        TransformExpr::Identity => Ok(Transform::eye()),
        TransformExpr::Rotate(angles) => {
            if angles.len() > 3 {
                return Err(Error::Parse(format!(
                    "expected at most 3 angles, found {}",
                    angles.len()
                )));
            }
            let angle = |i: usize| angles.get(i).copied().unwrap_or(0.0).to_radians();
            Ok(Transform::rotate(angle(2), angle(1), angle(0)))
        }
        TransformExpr::Scale(factors) => match factors[..] {
            [k] => Ok(Transform::scale(&Vector::repeat(k))),
            [x, y, z] => Ok(Transform::scale(&Vector::new(x, y, z))),
            _ => Err(Error::Parse(format!(
                "expected 1 or 3 scale factors, found {}",
                factors.len()
            ))),
        },
        TransformExpr::Coefficients(coefficients) => Transform::from_coefficients(&coefficients),
    }
}

fn finish<'a, O>(
    input: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> Result<O> {
    match all_consuming(delimited(space0, parser, space0))(input) {
        Ok((_, output)) => Ok(output),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(Error::Parse(format!(
            "unexpected {:?} in {:?}",
            e.input, input
        ))),
        Err(nom::Err::Incomplete(_)) => Err(Error::Parse(format!("incomplete value {input:?}"))),
    }
}

fn transform_expr(input: &str) -> IResult<&str, TransformExpr> {
    alt((
        value(
            TransformExpr::Identity,
            alt((tag_no_case("identity"), tag_no_case("eye"))),
        ),
        map(tagged_list("r"), TransformExpr::Rotate),
        map(tagged_list("s"), TransformExpr::Scale),
        map(tagged_list("m"), TransformExpr::Coefficients),
    ))(input)
}

fn tagged_list<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<f32>> {
    preceded(pair(tag_no_case(name), char(',')), number_list)
}

fn number_list(input: &str) -> IResult<&str, Vec<f32>> {
    separated_list1(char(','), number)(input)
}

fn number(input: &str) -> IResult<&str, f32> {
    let parsed: IResult<&str, f32> = delimited(space0, float, space0)(input);
    let (rest, n) = parsed?;
    if n.is_finite() {
        Ok((rest, n))
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Float,
        )))
    }
}
