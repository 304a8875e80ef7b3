// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Control network nodes.  Only the value-file nodes (`cvf`, `dvf`) are
//! modeled; any other node type is rejected when read.

use std::collections::HashMap;

use contam_core::variant_err;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::prj::Result;
use crate::prj::reader::Reader;
use crate::prj::section::{Element, write_fields};

/// Value read by name from a continuous or discrete value file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CdvDat {
    pub valuename: String,
}

impl CdvDat {
    fn read_details(reader: &mut Reader) -> Result<Self> {
        Ok(CdvDat {
            valuename: reader.read_whole_line()?,
        })
    }

    fn write_details(&self, out: &mut String) {
        out.push_str(&self.valuename);
        out.push('\n');
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ControlDetails {
    CvfDat(CdvDat),
    DvfDat(CdvDat),
}

impl ControlDetails {
    pub fn default_data_type(&self) -> &'static str {
        match self {
            ControlDetails::CvfDat(_) => "cvf",
            ControlDetails::DvfDat(_) => "dvf",
        }
    }

    fn write_details(&self, out: &mut String) {
        match self {
            ControlDetails::CvfDat(details) | ControlDetails::DvfDat(details) => {
                details.write_details(out)
            }
        }
    }
}

type DetailsReader = fn(&mut Reader<'_>) -> Result<ControlDetails>;

lazy_static! {
    static ref CONTROL_NODE_TYPES: HashMap<&'static str, DetailsReader> = {
        let mut types: HashMap<&'static str, DetailsReader> = HashMap::new();
        types.insert("cvf", |r| CdvDat::read_details(r).map(ControlDetails::CvfDat));
        types.insert("dvf", |r| CdvDat::read_details(r).map(ControlDetails::DvfDat));
        types
    };
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlNode {
    pub nr: i32,
    pub data_type: String,
    pub seqnr: i32,
    pub flags: u32,
    /// number of required inputs
    pub inreq: i32,
    pub n1: i32,
    pub n2: i32,
    pub name: String,
    pub desc: String,
    pub details: ControlDetails,
}

impl ControlNode {
    pub fn new(name: &str, details: ControlDetails) -> Self {
        ControlNode {
            nr: 0,
            data_type: details.default_data_type().to_owned(),
            seqnr: 0,
            flags: 0,
            inreq: 0,
            n1: 0,
            n2: 0,
            name: name.to_owned(),
            desc: String::new(),
            details,
        }
    }
}

impl Element for ControlNode {
    fn read_element(reader: &mut Reader) -> Result<Self> {
        let nr = reader.read_int()?;
        let data_type = reader.read_token()?;
        let read_details = match CONTROL_NODE_TYPES.get(data_type.as_str()) {
            Some(read_details) => *read_details,
            None => {
                return variant_err!(
                    UnknownControlNode,
                    reader.line(),
                    format!("unrecognized control node type '{data_type}'")
                );
            }
        };
        let seqnr = reader.read_int()?;
        let flags = reader.read_uint()?;
        let inreq = reader.read_int()?;
        let n1 = reader.read_int()?;
        let n2 = reader.read_int()?;
        let name = reader.read_token()?;
        let desc = reader.read_whole_line()?;
        let details = read_details(reader)?;
        Ok(ControlNode {
            nr,
            data_type,
            seqnr,
            flags,
            inreq,
            n1,
            n2,
            name,
            desc,
            details,
        })
    }

    fn write(&self, out: &mut String) {
        write_fields!(out; self.nr, self.data_type);
        write_fields!(out; self.seqnr, self.flags, self.inreq, self.n1, self.n2, self.name);
        out.push_str(&self.desc);
        out.push('\n');
        self.details.write_details(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contam_core::{ErrorCode, ErrorKind};

    #[test]
    fn test_value_file_nodes() {
        for (tag, dvf) in [("cvf", false), ("dvf", true)] {
            let text = format!("1 {tag}\n1 0 0 0 0 occupancy\nscheduled occupants\nOccupancy Level 2\n");
            let mut reader = Reader::from_text(&text);
            let node = ControlNode::read_element(&mut reader).unwrap();
            assert_eq!(tag, node.data_type);
            assert_eq!("occupancy", node.name);
            match &node.details {
                ControlDetails::DvfDat(dat) if dvf => assert_eq!("Occupancy Level 2", dat.valuename),
                ControlDetails::CvfDat(dat) if !dvf => {
                    assert_eq!("Occupancy Level 2", dat.valuename)
                }
                other => panic!("wrong details for {tag}: {other:?}"),
            }

            let mut out = String::new();
            node.write(&mut out);
            assert_eq!(text, out);
        }
    }

    #[test]
    fn test_unknown_node_type() {
        let mut reader = Reader::from_text("1 sns\n1 0 1 2 0 sensor\n\n");
        let err = ControlNode::read_element(&mut reader).unwrap_err();
        assert_eq!(ErrorKind::UnknownVariant, err.kind);
        assert_eq!(ErrorCode::UnknownControlNode, err.code);
        assert!(err.get_details().unwrap().contains("'sns'"));
    }

    #[test]
    fn test_new_node() {
        let node = ControlNode::new("supply", ControlDetails::CvfDat(CdvDat::default()));
        assert_eq!("cvf", node.data_type);
        let mut out = String::new();
        node.write(&mut out);
        assert_eq!("0 cvf\n0 0 0 0 0 supply\n\n\n", out);
    }
}
