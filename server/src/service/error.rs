/*
 * Copyright (c) 2021 gematik GmbH
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *    http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use actix_web::{
    dev::HttpResponseBuilder, error::ResponseError, http::StatusCode, HttpResponse,
};
use serde::Serialize;
use thiserror::Error;

use super::{
    misc::AccessTokenError,
    routes::{
        appointment::Error as AppointmentError, clinic::Error as ClinicError,
        dose::Error as DoseError, immunization::Error as ImmunizationError,
        user::Error as UserError, vaccine::Error as VaccineError,
    },
};

/* RequestError */

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Access Token Error: {0}")]
    AccessTokenError(AccessTokenError),

    #[error("Vaccine Resource Error: {0}")]
    VaccineError(VaccineError),

    #[error("Dose Resource Error: {0}")]
    DoseError(DoseError),

    #[error("User Resource Error: {0}")]
    UserError(UserError),

    #[error("Clinic Resource Error: {0}")]
    ClinicError(ClinicError),

    #[error("Appointment Resource Error: {0}")]
    AppointmentError(AppointmentError),

    #[error("Immunization Resource Error: {0}")]
    ImmunizationError(ImmunizationError),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Not Found: {0}!")]
    NotFound(String),

    #[error("Invalid Query: {0}!")]
    QueryInvalid(String),

    #[error("Internal Error: {0}")]
    Internal(String),
}

impl RequestError {
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

impl ResponseError for RequestError {
    fn error_response(&self) -> HttpResponse {
        use RequestError as E;

        let res = ResponseBuilder::new();
        let mut res = match self {
            E::AccessTokenError(err) => match err {
                AccessTokenError::Missing => res
                    .status(StatusCode::UNAUTHORIZED)
                    .header("WWW-Authenticate", "Bearer realm='vaccination-record-service'"),
                AccessTokenError::InvalidRole => res.status(StatusCode::FORBIDDEN),
                AccessTokenError::Sign(_) => res.status(StatusCode::INTERNAL_SERVER_ERROR),
                _ => res.status(StatusCode::UNAUTHORIZED),
            },
            E::VaccineError(err) => match err {
                VaccineError::NotFound(_) => res.status(StatusCode::NOT_FOUND),
                VaccineError::NoneMatching => res.status(StatusCode::NOT_FOUND).empty_list(),
                VaccineError::CvxCodeTaken(_) => res.status(StatusCode::BAD_REQUEST),
                VaccineError::ActiveDoses(_) => res.status(StatusCode::BAD_REQUEST),
            },
            E::DoseError(err) => match err {
                DoseError::NotFound(_) => res.status(StatusCode::NOT_FOUND),
                DoseError::VaccineNotFound(_) => res.status(StatusCode::NOT_FOUND),
                DoseError::Duplicate(_) => res.status(StatusCode::BAD_REQUEST),
                DoseError::NoneForVaccine(_) => res.status(StatusCode::NOT_FOUND).empty_list(),
                DoseError::NoActiveRequirement { .. } => res.status(StatusCode::NOT_FOUND),
            },
            E::UserError(err) => match err {
                UserError::NotFound(_) => res.status(StatusCode::NOT_FOUND),
                UserError::EmailTaken(_) => res.status(StatusCode::BAD_REQUEST),
                UserError::NoneFound => res.status(StatusCode::NOT_FOUND).empty_list(),
                UserError::InvalidCredentials => res.status(StatusCode::UNAUTHORIZED),
            },
            E::ClinicError(err) => match err {
                ClinicError::NotFound(_) => res.status(StatusCode::NOT_FOUND),
                ClinicError::NoneFound => res.status(StatusCode::NOT_FOUND).empty_list(),
            },
            E::AppointmentError(err) => match err {
                AppointmentError::NotFound(_) => res.status(StatusCode::NOT_FOUND),
                AppointmentError::NoneFound => res.status(StatusCode::NOT_FOUND).empty_list(),
            },
            E::ImmunizationError(err) => match err {
                ImmunizationError::NotFound(_) => res.status(StatusCode::NOT_FOUND),
                ImmunizationError::UnknownUser(_) => res.status(StatusCode::BAD_REQUEST),
                ImmunizationError::UnknownVaccine(_) => res.status(StatusCode::BAD_REQUEST),
            },
            E::Validation(message) => res.status(StatusCode::BAD_REQUEST).details(message.clone()),
            E::NotFound(_) => res.status(StatusCode::NOT_FOUND),
            E::QueryInvalid(_) => res.status(StatusCode::BAD_REQUEST),
            E::Internal(message) => res
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .details(message.clone()),
        };

        if res.details.is_none() {
            res.details = Some(inner_message(self));
        }

        res.build()
    }
}

/// Message without the resource prefix of the outer variant.
fn inner_message(err: &RequestError) -> String {
    use RequestError as E;

    match err {
        E::AccessTokenError(err) => err.to_string(),
        E::VaccineError(err) => err.to_string(),
        E::DoseError(err) => err.to_string(),
        E::UserError(err) => err.to_string(),
        E::ClinicError(err) => err.to_string(),
        E::AppointmentError(err) => err.to_string(),
        E::ImmunizationError(err) => err.to_string(),
        err => err.to_string(),
    }
}

/* AsReqErrResult */

pub trait AsReqErrResult {
    type Value;

    fn as_req_err(self) -> Result<Self::Value, RequestError>;
}

impl<T, E> AsReqErrResult for Result<T, E>
where
    E: AsReqErr,
{
    type Value = T;

    fn as_req_err(self) -> Result<T, RequestError> {
        self.map_err(AsReqErr::as_req_err)
    }
}

/* AsReqErr */

pub trait AsReqErr {
    fn as_req_err(self) -> RequestError;
}

impl<T> From<T> for RequestError
where
    T: AsReqErr,
{
    fn from(err: T) -> RequestError {
        err.as_req_err()
    }
}

impl AsReqErr for AccessTokenError {
    fn as_req_err(self) -> RequestError {
        RequestError::AccessTokenError(self)
    }
}

impl AsReqErr for VaccineError {
    fn as_req_err(self) -> RequestError {
        RequestError::VaccineError(self)
    }
}

impl AsReqErr for DoseError {
    fn as_req_err(self) -> RequestError {
        RequestError::DoseError(self)
    }
}

impl AsReqErr for UserError {
    fn as_req_err(self) -> RequestError {
        RequestError::UserError(self)
    }
}

impl AsReqErr for ClinicError {
    fn as_req_err(self) -> RequestError {
        RequestError::ClinicError(self)
    }
}

impl AsReqErr for AppointmentError {
    fn as_req_err(self) -> RequestError {
        RequestError::AppointmentError(self)
    }
}

impl AsReqErr for ImmunizationError {
    fn as_req_err(self) -> RequestError {
        RequestError::ImmunizationError(self)
    }
}

/* ResponseBuilder */

struct ResponseBuilder {
    status: Option<StatusCode>,
    details: Option<String>,
    empty_list: bool,
    header: Vec<(&'static str, &'static str)>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,

    error: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<()>>,
}

impl ResponseBuilder {
    fn new() -> Self {
        Self {
            status: None,
            details: None,
            empty_list: false,
            header: Vec::new(),
        }
    }

    fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);

        self
    }

    fn details(mut self, details: String) -> Self {
        self.details = Some(details);

        self
    }

    fn empty_list(mut self) -> Self {
        self.empty_list = true;

        self
    }

    fn header(mut self, key: &'static str, value: &'static str) -> Self {
        self.header.push((key, value));

        self
    }

    fn build(self) -> HttpResponse {
        let status = self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let details = self.details.unwrap_or_default();

        let mut res = HttpResponseBuilder::new(status);
        for (name, value) in self.header {
            res.header(name, value);
        }

        let data = if self.empty_list {
            Some(Vec::new())
        } else {
            None
        };

        res.json(&ErrorBody {
            success: false,
            error: &details,
            data,
        })
    }
}
